use icetrack_macros::Columns;

#[derive(Columns)]
struct Mixed {
    xpos: f64,
    count: usize,
}

fn main() {
    let m = Mixed { xpos: 1.0, count: 2 };
    let _ = m.xpos + m.count as f64;
}
