use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use parley::handling;
use parley::signal;
use parley::to_escape;
use parley::types::Condition;
use parley::types::Disposition;
use parley::types::Handler;
use parley::types::Symbol;
use std::hint::black_box;

fn bench_dispatch(criterion: &mut Criterion) {
  let mut group = criterion.benchmark_group("dispatch");

  group.bench_function("signal-unhandled", |bench| {
    bench.iter(|| black_box(signal(Condition::new("line-end"))))
  });

  group.bench_function("signal-handled", |bench| {
    handling(
      [Handler::on("line-end", |_| Disposition::handled(()))],
      || {
        bench.iter(|| black_box(signal(Condition::new("line-end"))));
      },
    )
  });

  group.bench_function("signal-deep-stack", |bench| {
    fn nest(depth: usize, bench: &mut criterion::Bencher<'_>) {
      if depth == 0 {
        bench.iter(|| black_box(signal(Condition::new("line-end"))));
        return;
      }

      handling(
        [Handler::on("unrelated", |_| Disposition::Declined)],
        move || nest(depth - 1, bench),
      );
    }

    nest(16, bench);
  });

  group.bench_function("escape-round-trip", |bench| {
    bench.iter(|| {
      to_escape(|exit| {
        exit.escape(black_box(1_i32));
      })
    })
  });

  group.bench_function("symbol-intern", |bench| {
    bench.iter(|| black_box(Symbol::new("line-end")))
  });

  group.finish();
}

criterion_group! {
  name = benches;
  config = Criterion::default();
  targets = bench_dispatch
}

criterion_main!(benches);
