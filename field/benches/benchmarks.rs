use criterion::{criterion_group, criterion_main, Criterion};
use msweeper_field::Field;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn run_benches(c: &mut Criterion) {
    c.bench_function("sparse opening click", |b| b.iter(|| {
        let mut rng = StdRng::seed_from_u64(42);
        let mut field = Field::new(300, 300, 900).unwrap();
        let _ = field.reveal((150, 150), &mut rng);
        field
    }));
}

criterion_group!(benches, run_benches);
criterion_main!(benches);
