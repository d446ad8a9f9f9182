#[macro_use]
extern crate criterion;
use criterion::Criterion;
use rand::rngs::OsRng;
use xnyss::address::Address;
use xnyss::tree::NyTree;
use xnyss::wotsp;

const SEED: [u8; 32] = [7u8; 32];
const PUB_SEED: [u8; 32] = [8u8; 32];
const MSG: [u8; 32] = [9u8; 32];

fn gen_public_key(c: &mut Criterion) {
    c.bench_function("W-OTS+ public key generation", |b| {
        b.iter(|| wotsp::gen_public_key(&SEED, &PUB_SEED, Address::default()))
    });
}

fn wots_sign(c: &mut Criterion) {
    c.bench_function("W-OTS+ signing", |b| {
        b.iter(|| wotsp::sign(&MSG, &SEED, &PUB_SEED, Address::default()))
    });
}

fn wots_pk_from_sig(c: &mut Criterion) {
    let sig = wotsp::sign(&MSG, &SEED, &PUB_SEED, Address::default());
    c.bench_function("W-OTS+ public key recovery", |b| {
        b.iter(|| wotsp::pk_from_sig(&sig, &MSG, &PUB_SEED, Address::default()))
    });
}

fn tree_sign(c: &mut Criterion) {
    let txid = [10u8; 32];
    c.bench_function("Tree signing, fresh tree", |b| {
        b.iter(|| {
            let mut tree = NyTree::new(&SEED, &PUB_SEED, false);
            tree.sign(&MSG, &txid, &mut OsRng).unwrap()
        })
    });
}

fn tree_sign_subtree(c: &mut Criterion) {
    let txid = [10u8; 32];
    c.bench_function("Tree signing, 10 signatures in one subtree", |b| {
        b.iter(|| {
            let mut tree = NyTree::new(&SEED, &PUB_SEED, false);
            for _ in 0..10 {
                tree.sign(&MSG, &txid, &mut OsRng).unwrap();
            }
        })
    });
}

criterion_group!(
    benches,
    gen_public_key,
    wots_sign,
    wots_pk_from_sig,
    tree_sign,
    tree_sign_subtree
);
criterion_main!(benches);
