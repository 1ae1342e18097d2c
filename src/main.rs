//! animpack CLI - compile animation assets into a binary archive.

use std::env;

use animpack::compile::Batch;
use animpack::host::{FbxHost, GltfHost};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut filter = log::LevelFilter::Info;
    let mut positional: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => filter = log::LevelFilter::Debug,
            "-q" | "--quiet" => filter = log::LevelFilter::Error,
            "-h" | "--help" => {
                print_usage(&args[0]);
                return;
            }
            _ => positional.push(arg),
        }
    }
    env_logger::Builder::new().filter_level(filter).init();

    if positional.len() != 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let mut gltf = GltfHost::new();
    let mut fbx = FbxHost::new();
    match Batch::new(positional[0], positional[1]).run(&mut [&mut gltf, &mut fbx]) {
        Ok(appended) => {
            println!("archive updated: {} bytes appended", appended);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    println!("Usage: {} [options] <input-dir> <archive>", program);
    println!();
    println!("Compiles every .gltf/.glb/.fbx animation under <input-dir>");
    println!("and appends the records to <archive>. The archive is never");
    println!("truncated; delete it first for a clean rebuild. FBX import");
    println!("is not supported in this build; an .fbx asset aborts the run.");
    println!();
    println!("Options:");
    println!("  -v, --verbose   debug logging");
    println!("  -q, --quiet     errors only");
    println!("  -h, --help      show this help");
}
