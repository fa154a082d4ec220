use icetrack_macros::Columns;

#[derive(Debug, Clone, Copy, Columns)]
pub struct Tracer {
    pub xpos: f64,
    pub ypos: f64,
    pub englt: f64,
}

fn main() {
    let r = Tracer { xpos: 1.0, ypos: 2.0, englt: 3.0 };
    let mut store = TracerColumns::with_capacity(10);
    store.push(&r);
    assert_eq!(store.len(), 1);
    assert!(!store.is_empty());
    assert_eq!(store.get(0).ypos, 2.0);
    assert_eq!(Tracer::field_names(), &["xpos", "ypos", "englt"]);
}
