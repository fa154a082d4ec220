use icetrack_macros::Columns;

#[derive(Debug, Clone, Copy, Columns)]
#[columns(store_name = "TracerStore")]
pub struct Tracer {
    pub rhpos: f64,
    pub wpos: f64,
}

fn main() {
    let r = Tracer { rhpos: 1.0, wpos: 2.0 };
    let mut store = TracerStore::new();
    store.push(&r);
    store.set(0, &Tracer { rhpos: 0.5, wpos: 2.0 });
    assert_eq!(store.rhpos, vec![0.5]);
    assert_eq!(Tracer::field_names(), &["rhpos", "wpos"]);
}
