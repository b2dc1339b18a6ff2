use std::env;
use std::path::Path;

fn main() {
    for arg in env::args_os().skip(1) {
        let port = cereal::open(&arg).unwrap();
        port.close().unwrap();

        let port = cereal::unix::TTYPort::open(Path::new(&arg)).unwrap();
        println!("opened {:?}, terminal: {}", arg, port.is_terminal());
    }
}
