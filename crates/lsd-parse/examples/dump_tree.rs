use std::io::{self, Read};

use lsd_parse::Parser;

fn main() {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source).unwrap();

    match Parser::new(source.chars().map(Ok::<_, io::Error>)).parse() {
        Ok(tree) => println!("{tree:#?}"),
        Err(error) => eprintln!("error: {error}"),
    }
}
