use icetrack_macros::Columns;

#[derive(Columns)]
enum Tracer {
    Surface,
    Buried,
}

fn main() {
    let _ = [Tracer::Surface, Tracer::Buried];
}
