use icetrack_macros::Columns;

#[derive(Columns)]
struct Empty {}

fn main() {
    let _ = Empty {};
}
