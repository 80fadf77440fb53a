use std::process::ExitCode;
use std::{env, fs};

use lsd_tree::{Diagnostic, Navigate, PathSegment};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let (Some(file), Some(query)) = (args.next(), args.next()) else {
        eprintln!("usage: query <file> <dotted.path>");
        return ExitCode::FAILURE;
    };

    let source = match fs::read_to_string(&file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };

    let tree = match lsd_tree::parse_str(&source) {
        Ok(tree) => tree,
        Err(error) => {
            error.write_report(&file, &source, std::io::stderr());
            return ExitCode::FAILURE;
        }
    };

    let path: Vec<PathSegment> = query.split('.').map(PathSegment::from).collect();
    match tree.inner(path) {
        Some(node) => {
            println!("{node:#?}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("no node at '{query}'");
            ExitCode::FAILURE
        }
    }
}
