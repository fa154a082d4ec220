use icetrack_macros::Columns;

#[derive(Columns)]
struct Pair(f64, f64);

fn main() {
    let p = Pair(1.0, 2.0);
    let _ = p.0 + p.1;
}
