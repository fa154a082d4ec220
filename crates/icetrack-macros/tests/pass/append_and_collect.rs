use icetrack_macros::Columns;

#[derive(Debug, Clone, Copy, PartialEq, Columns)]
pub struct Tracer {
    pub zpos: f64,
    pub tpos: f64,
}

fn main() {
    let mut old: TracerColumns = (0..3)
        .map(|i| Tracer { zpos: i as f64, tpos: 0.0 })
        .collect();
    let mut batch: TracerColumns = vec![Tracer { zpos: 10.0, tpos: 5.0 }].into_iter().collect();

    old.append(&mut batch);
    assert_eq!(old.len(), 4);
    assert!(batch.is_empty());
    assert_eq!(old.zpos, vec![0.0, 1.0, 2.0, 10.0]);
    assert_eq!(old.tpos.len(), old.zpos.len());

    let last = old.iter().last();
    assert_eq!(last, Some(Tracer { zpos: 10.0, tpos: 5.0 }));
}
