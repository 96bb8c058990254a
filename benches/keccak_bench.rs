//! Criterion benchmarks: the bare permutation, one-shot digests and XOF output.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use krypton_keccak::keccak::keccak_f1600;
use krypton_keccak::{digest, kmac, KeccakParameter, Session};

fn bench_permutation(c: &mut Criterion) {
	let mut state = [[0u64; 5]; 5];

	let mut g = c.benchmark_group("permutation");
	g.throughput(Throughput::Bytes(200));
	g.bench_function("keccak_f1600", |b| {
		b.iter(|| keccak_f1600(black_box(&mut state)));
	});
	g.finish();
}

fn bench_digest(c: &mut Criterion) {
	let message = vec![0x5a; 16 * 1024];

	let mut g = c.benchmark_group("digest");
	g.throughput(Throughput::Bytes(message.len() as u64));

	for parameter in [KeccakParameter::Sha3_256, KeccakParameter::Sha3_512, KeccakParameter::Shake128] {
		g.bench_with_input(BenchmarkId::from_parameter(parameter), &message, |b, message| {
			b.iter(|| black_box(digest(parameter, message, None)).unwrap());
		});
	}

	g.bench_function("KMAC256", |b| {
		b.iter(|| black_box(kmac(KeccakParameter::Kmac256, &[7; 32], b"bench", &message, Some(64))).unwrap());
	});

	g.finish();
}

fn bench_squeeze(c: &mut Criterion) {
	let mut g = c.benchmark_group("squeeze");
	g.throughput(Throughput::Bytes(16 * 1024));
	g.bench_function("SHAKE256", |b| {
		b.iter(|| {
			let mut session = Session::new(KeccakParameter::Shake256).unwrap();
			let mut cursor = session.finalize().unwrap();
			black_box(cursor.next_bytes(16 * 1024)).unwrap()
		});
	});
	g.finish();
}

criterion_group!(benches, bench_permutation, bench_digest, bench_squeeze);
criterion_main!(benches);
