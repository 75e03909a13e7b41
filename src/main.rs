use clap::Parser;
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

#[derive(Parser, Debug, Clone)]
struct Args {
    /// A .rle or .bmr file, or a directory of them
    input: PathBuf,

    /// Directory the decoded .png files land in
    #[arg(short, long, default_value = "new")]
    output: PathBuf,

    /// Row width in pixels. The files store no dimensions and the width
    /// changes per game; 512 is right for Spiderman 1 (PSX).
    #[arg(short, long, default_value_t = 512)]
    width: usize,

    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    #[arg(short, long)]
    verbose: bool,
}

fn has_convertible_extension(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("rle") || ext.eq_ignore_ascii_case("bmr"),
        None => false,
    }
}

fn process_file(path: &PathBuf, width: usize, output_dir: &Path) -> anyhow::Result<()> {
    println!("{}", path.to_str().unwrap_or("unk"));
    let bytes = fs::read(path)?;

    let filename = match path.file_name().and_then(|name| name.to_str()) {
        Some(x) => x,
        None => return Err(anyhow::anyhow!("failed to get file name")),
    };

    let canvas = rle16_to_png::convert(&bytes, filename, width)?;

    let pixels: Vec<u8> = canvas
        .to_interleaved_rows()
        .into_iter()
        .flatten()
        .collect();

    let image = RgbImage::from_raw(canvas.width() as u32, canvas.height() as u32, pixels)
        .ok_or_else(|| anyhow::anyhow!("decoded pixels do not form a full image"))?;

    let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
        Some(x) => x,
        None => return Err(anyhow::anyhow!("failed to get file stem")),
    };

    fs::create_dir_all(output_dir)?;
    image.save(output_dir.join(format!("{stem}.png")))?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        true => log::Level::Trace,
        false => log::Level::Warn,
    };
    simple_logger::init_with_level(log_level)?;

    match args.input.is_file() {
        true => process_file(&args.input, args.width, &args.output)?,
        false => {
            let mut entries: Vec<PathBuf> = Vec::new();

            for entry in fs::read_dir(&args.input)? {
                let entryw = entry?;
                let fpath = entryw.path();

                let meta = entryw.metadata()?;
                let fname = match fpath.file_name() {
                    Some(s) => s.to_str().unwrap_or(""),
                    None => continue,
                };

                if meta.is_dir() || fname.starts_with('.') || !has_convertible_extension(&fpath) {
                    continue;
                }

                entries.push(fpath);
            }

            let threads = args.threads.max(1);
            let chunk_size = ((entries.len() + threads - 1) / threads).max(1);

            let width = args.width;
            let output_dir = &args.output;

            thread::scope(|s| {
                let threads: Vec<_> = entries
                    .chunks(chunk_size)
                    .map(|chunk| {
                        s.spawn(move || {
                            let mut success = 0;

                            for fpath in chunk {
                                match process_file(fpath, width, output_dir) {
                                    Ok(_) => success += 1,
                                    Err(e) => println!("failed to convert {}: {}", fpath.display(), e),
                                };
                            }

                            success
                        })
                    })
                    .collect();

                let sum = threads
                    .into_iter()
                    .fold(0, |pv, thread| pv + thread.join().unwrap_or(0));

                println!("{}/{} success", sum, entries.len());
            })
        }
    }

    Ok(())
}
