// Encode/decode benchmarks for the operation codec.
//
// Covers amount parsing, muxed account text rendering, and full operation
// round trips for a plain payment and a five-hop path payment.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use lumen_codec::account::{AccountId, MuxedAccount};
use lumen_codec::amount;
use lumen_codec::asset::Asset;
use lumen_codec::operation::{Operation, OperationBuilder, PathPaymentStrictSendOp, PaymentOp};
use lumen_codec::{ReadXdr, WriteXdr};

fn payment() -> Operation {
    OperationBuilder::new(PaymentOp {
        destination: MuxedAccount::muxed(AccountId::from_bytes([7; 32]), 42),
        asset: Asset::credit("USDC", AccountId::from_bytes([9; 32])).unwrap(),
        amount: amount::encode("1234.5678901").unwrap().into(),
    })
    .source_account(MuxedAccount::new(AccountId::from_bytes([1; 32])))
    .build()
    .unwrap()
}

fn path_payment() -> Operation {
    OperationBuilder::new(PathPaymentStrictSendOp {
        send_asset: Asset::native(),
        send_amount: amount::encode("10").unwrap().into(),
        destination: MuxedAccount::new(AccountId::from_bytes([2; 32])),
        dest_asset: Asset::credit("EURT", AccountId::from_bytes([3; 32])).unwrap(),
        dest_min: amount::encode("9.5").unwrap().into(),
        path: (0..5u8)
            .map(|i| Asset::credit(&format!("HOP{}", i), AccountId::from_bytes([i; 32])).unwrap())
            .collect(),
    })
    .build()
    .unwrap()
}

fn bench_amount(c: &mut Criterion) {
    c.bench_function("amount/encode", |b| {
        b.iter(|| amount::encode(black_box("922337203685.4775807")))
    });
    c.bench_function("amount/decode", |b| b.iter(|| amount::decode(black_box(i64::MIN))));
}

fn bench_muxed_text(c: &mut Criterion) {
    let account = AccountId::from_bytes([5; 32]);
    c.bench_function("muxed/address_uncached", |b| {
        b.iter(|| MuxedAccount::muxed(account, black_box(77)).address().len())
    });
    let cached = MuxedAccount::muxed(account, 77);
    c.bench_function("muxed/address_cached", |b| b.iter(|| cached.address().len()));
}

fn bench_operations(c: &mut Criterion) {
    for (name, op) in [("payment", payment()), ("path_payment_5_hops", path_payment())] {
        let wire = op.to_xdr().unwrap();
        let mut group = c.benchmark_group(format!("operation/{}", name));
        group.throughput(Throughput::Bytes(wire.len() as u64));
        group.bench_function("encode", |b| b.iter(|| black_box(&op).to_xdr().unwrap()));
        group.bench_function("decode", |b| {
            b.iter(|| Operation::from_xdr(black_box(&wire)).unwrap())
        });
        group.finish();
    }
}

criterion_group!(benches, bench_amount, bench_muxed_text, bench_operations);
criterion_main!(benches);
