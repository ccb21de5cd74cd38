use bip340_batch::{
    dev::{random_secret_key, sign, verify_single, x_only_public_key},
    verify, BatchItem, BatchVerifier,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand_core::{OsRng, RngCore};

struct Batch {
    messages: Vec<[u8; 32]>,
    pubkeys: Vec<[u8; 32]>,
    signatures: Vec<[u8; 64]>,
}

fn make_batch(size: usize) -> Batch {
    let mut batch = Batch {
        messages: Vec::with_capacity(size),
        pubkeys: Vec::with_capacity(size),
        signatures: Vec::with_capacity(size),
    };
    for _ in 0..size {
        let secret_key = random_secret_key(&mut OsRng);
        let mut message = [0u8; 32];
        OsRng.fill_bytes(&mut message);
        let mut aux_rand = [0u8; 32];
        OsRng.fill_bytes(&mut aux_rand);

        batch.pubkeys.push(x_only_public_key(&secret_key).unwrap());
        batch.signatures.push(sign(&secret_key, &message, &aux_rand).unwrap());
        batch.messages.push(message);
    }
    batch
}

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Schnorr verification");
    group.sample_size(20);

    for size in [1, 16, 64, 256] {
        let batch = make_batch(size);

        group.bench_with_input(BenchmarkId::new("batch", size), &batch, |b, batch| {
            b.iter(|| verify(black_box(&batch.messages), &batch.pubkeys, &batch.signatures).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("queued", size), &batch, |b, batch| {
            b.iter(|| {
                let mut verifier: BatchVerifier = BatchVerifier::new();
                for ((message, pubkey), signature) in batch.messages.iter().zip(&batch.pubkeys).zip(&batch.signatures) {
                    verifier.queue(BatchItem::new(message, pubkey, signature).unwrap());
                }
                verifier.verify()
            })
        });

        group.bench_with_input(BenchmarkId::new("one by one", size), &batch, |b, batch| {
            b.iter(|| {
                batch
                    .messages
                    .iter()
                    .zip(&batch.pubkeys)
                    .zip(&batch.signatures)
                    .all(|((message, pubkey), signature)| verify_single(black_box(message), pubkey, signature))
            })
        });
    }

    group.finish()
}

criterion_group!(benches, bench_verification);
criterion_main!(benches);
