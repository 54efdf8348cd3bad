//! End-to-end tests for the operation codec.
//!
//! Every test goes through the public API only: build an operation, encode
//! it, decode the bytes, and compare. Exact byte layouts are pinned for the
//! shapes a wallet sends most, because a drift there is a rejected
//! transaction in production.

use lumen_codec::account::{AccountId, MuxedAccount};
use lumen_codec::amount::Amount;
use lumen_codec::asset::{Asset, AssetCode, ChangeTrustAsset, LiquidityPoolParameters, Price};
use lumen_codec::config::{AUTH_CLAWBACK_ENABLED_FLAG, TRUSTLINE_AUTHORIZED_FLAG};
use lumen_codec::operation::*;
use lumen_codec::xdr::{ExtensionPoint, Hash};
use lumen_codec::{CodecError, ReadXdr, WriteXdr};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const ZERO_KEY: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

fn account(seed: u8) -> AccountId {
    AccountId::from_bytes([seed; 32])
}

fn muxed(seed: u8) -> MuxedAccount {
    MuxedAccount::new(account(seed))
}

fn usd() -> Asset {
    Asset::credit("USD", account(0xEE)).unwrap()
}

fn amount(text: &str) -> Amount {
    Amount::from_decimal(text).unwrap()
}

fn balance_id(seed: u8) -> ClaimableBalanceId {
    ClaimableBalanceId(Hash([seed; 32]))
}

fn roundtrip(op: &Operation) -> Operation {
    let wire = op.to_xdr().expect("encode");
    Operation::from_xdr(&wire).expect("decode")
}

/// One representative body per modelled operation type.
fn sample_bodies() -> Vec<OperationBody> {
    let pool = LiquidityPoolParameters::constant_product(Asset::Native, usd()).unwrap();
    vec![
        CreateAccountOp {
            destination: account(1),
            starting_balance: amount("10"),
        }
        .into(),
        PaymentOp {
            destination: MuxedAccount::muxed(account(2), 42),
            asset: usd(),
            amount: amount("0.0000001"),
        }
        .into(),
        PathPaymentStrictReceiveOp {
            send_asset: Asset::Native,
            send_max: amount("100"),
            destination: muxed(3),
            dest_asset: usd(),
            dest_amount: amount("5"),
            path: vec![Asset::credit("EURT", account(4)).unwrap()],
        }
        .into(),
        ManageSellOfferOp {
            selling: Asset::Native,
            buying: usd(),
            amount: amount("12.5"),
            price: Price::new(3, 7).unwrap(),
            offer_id: 0,
        }
        .into(),
        CreatePassiveSellOfferOp {
            selling: usd(),
            buying: Asset::Native,
            amount: amount("1"),
            price: Price::new(1, 1).unwrap(),
        }
        .into(),
        SetOptionsOp {
            set_flags: Some(AUTH_CLAWBACK_ENABLED_FLAG),
            home_domain: Some("example.org".into()),
            signer: Some(Signer {
                key: SignerKey::PreAuthTx { hash: Hash([5; 32]) },
                weight: 1,
            }),
            ..Default::default()
        }
        .into(),
        ChangeTrustOp {
            line: ChangeTrustAsset::PoolShare(pool.clone()),
            limit: Amount::from_stroops(i64::MAX),
        }
        .into(),
        AllowTrustOp {
            trustor: account(6),
            asset: AssetCode::new("USD").unwrap(),
            authorize: TRUSTLINE_AUTHORIZED_FLAG,
        }
        .into(),
        OperationBody::AccountMerge(MuxedAccount::muxed(account(7), 1)),
        OperationBody::Inflation,
        ManageDataOp {
            data_name: "profile".into(),
            data_value: Some(b"hello".to_vec()),
        }
        .into(),
        BumpSequenceOp { bump_to: 1 << 40 }.into(),
        ManageBuyOfferOp {
            selling: usd(),
            buying: Asset::Native,
            buy_amount: amount("3"),
            price: Price::new(2, 1).unwrap(),
            offer_id: 99,
        }
        .into(),
        PathPaymentStrictSendOp {
            send_asset: usd(),
            send_amount: amount("2"),
            destination: muxed(8),
            dest_asset: Asset::Native,
            dest_min: amount("1.9"),
            path: vec![],
        }
        .into(),
        CreateClaimableBalanceOp {
            asset: Asset::Native,
            amount: amount("50"),
            claimants: vec![
                Claimant {
                    destination: account(9),
                    predicate: ClaimPredicate::Unconditional,
                },
                Claimant {
                    destination: account(10),
                    predicate: ClaimPredicate::not(ClaimPredicate::BeforeRelativeTime(86_400)),
                },
            ],
        }
        .into(),
        ClaimClaimableBalanceOp {
            balance_id: balance_id(11),
        }
        .into(),
        BeginSponsoringFutureReservesOp {
            sponsored_id: account(12),
        }
        .into(),
        OperationBody::EndSponsoringFutureReserves,
        RevokeSponsorshipOp::LedgerEntry(LedgerKey::Trustline {
            account_id: account(13),
            asset: lumen_codec::asset::TrustLineAsset::PoolShare {
                pool_id: pool.pool_id(),
            },
        })
        .into(),
        ClawbackOp {
            asset: usd(),
            from: MuxedAccount::muxed(account(14), 7),
            amount: amount("4"),
        }
        .into(),
        ClawbackClaimableBalanceOp {
            balance_id: balance_id(15),
        }
        .into(),
        SetTrustLineFlagsOp {
            trustor: account(16),
            asset: usd(),
            clear_flags: 0,
            set_flags: TRUSTLINE_AUTHORIZED_FLAG,
        }
        .into(),
        LiquidityPoolDepositOp {
            liquidity_pool_id: pool.pool_id(),
            max_amount_a: amount("10"),
            max_amount_b: amount("20"),
            min_price: Price::new(1, 3).unwrap(),
            max_price: Price::new(3, 1).unwrap(),
        }
        .into(),
        LiquidityPoolWithdrawOp {
            liquidity_pool_id: pool.pool_id(),
            amount: amount("1"),
            min_amount_a: amount("0.5"),
            min_amount_b: amount("0.5"),
        }
        .into(),
        ExtendFootprintTtlOp {
            ext: ExtensionPoint,
            extend_to: 100_000,
        }
        .into(),
        RestoreFootprintOp::default().into(),
    ]
}

// ---------------------------------------------------------------------------
// Round Trips
// ---------------------------------------------------------------------------

#[test]
fn every_operation_type_roundtrips() {
    let bodies = sample_bodies();
    let mut covered: Vec<_> = bodies.iter().map(|b| b.operation_type()).collect();
    covered.sort();
    assert_eq!(covered, OperationType::ALL.to_vec());

    for body in bodies {
        let ty = body.operation_type();
        let op = OperationBuilder::new(body).build().unwrap();
        let decoded = roundtrip(&op);
        assert_eq!(decoded, op, "round trip changed {}", ty);
        assert_eq!(decoded.to_xdr().unwrap(), op.to_xdr().unwrap());
    }
}

#[test]
fn every_operation_roundtrips_with_muxed_source() {
    let source = MuxedAccount::muxed(account(0x42), u64::MAX);
    for body in sample_bodies() {
        let op = OperationBuilder::new(body)
            .source_account(source.clone())
            .build()
            .unwrap();
        let decoded = roundtrip(&op);
        assert_eq!(decoded.source_account.as_ref(), Some(&source));
        assert_eq!(decoded, op);
    }
}

#[test]
fn base64_transport_roundtrip() {
    let op = OperationBuilder::new(OperationBody::Inflation).build().unwrap();
    let encoded = op.to_xdr_base64().unwrap();
    assert_eq!(encoded, "AAAAAAAAAAk=");
    assert_eq!(Operation::from_xdr_base64(&encoded).unwrap(), op);
}

#[test]
fn json_roundtrip_of_every_operation() {
    for body in sample_bodies() {
        let op = OperationBuilder::new(body).build().unwrap();
        let json = serde_json::to_string(&op).unwrap();
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }
}

// ---------------------------------------------------------------------------
// Exact Bytes
// ---------------------------------------------------------------------------

#[test]
fn native_payment_exact_bytes() {
    let op = OperationBuilder::new(PaymentOp {
        destination: MuxedAccount::from_text(ZERO_KEY).unwrap(),
        asset: Asset::native(),
        amount: amount("1"),
    })
    .build()
    .unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&[0, 0, 0, 0]); // no source account
    expected.extend_from_slice(&[0, 0, 0, 1]); // PAYMENT
    expected.extend_from_slice(&[0, 0, 0, 0]); // KEY_TYPE_ED25519
    expected.extend_from_slice(&[0u8; 32]); // destination key
    expected.extend_from_slice(&[0, 0, 0, 0]); // ASSET_TYPE_NATIVE
    expected.extend_from_slice(&[0, 0, 0, 0, 0, 0x98, 0x96, 0x80]); // 10_000_000

    assert_eq!(op.to_xdr().unwrap(), expected);
}

#[test]
fn muxed_source_exact_prefix() {
    let op = OperationBuilder::new(OperationBody::Inflation)
        .source_account(MuxedAccount::muxed(account(0xAB), 0x0102_0304_0506_0708))
        .build()
        .unwrap();
    let wire = op.to_xdr().unwrap();
    assert_eq!(&wire[..4], &[0, 0, 0, 1]);
    assert_eq!(&wire[4..8], &[0, 0, 1, 0]);
    assert_eq!(&wire[8..16], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert!(wire[16..48].iter().all(|&b| b == 0xAB));
    assert_eq!(&wire[48..], &[0, 0, 0, 9]);
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

fn strict_send_with_hops(hops: u8) -> PathPaymentStrictSendOp {
    PathPaymentStrictSendOp {
        send_asset: Asset::Native,
        send_amount: amount("1"),
        destination: muxed(1),
        dest_asset: usd(),
        dest_min: amount("1"),
        path: (0..hops)
            .map(|i| Asset::credit(&format!("HOP{}", i), account(i)).unwrap())
            .collect(),
    }
}

#[test]
fn five_hop_path_survives_roundtrip_in_order() {
    let op = OperationBuilder::new(strict_send_with_hops(5)).build().unwrap();
    let decoded = roundtrip(&op);
    match decoded.body {
        OperationBody::PathPaymentStrictSend(payment) => {
            let codes: Vec<_> = payment.path.iter().filter_map(|a| a.code()).collect();
            assert_eq!(codes, vec!["HOP0", "HOP1", "HOP2", "HOP3", "HOP4"]);
        }
        other => panic!("decoded wrong body: {:?}", other),
    }
}

#[test]
fn six_hop_path_is_a_constraint_violation() {
    let err = OperationBuilder::new(strict_send_with_hops(6))
        .build()
        .unwrap_err();
    assert!(matches!(err, CodecError::ConstraintViolation(_)));
}

#[test]
fn eleven_claimants_rejected() {
    let claimants = (0..11)
        .map(|i| Claimant {
            destination: account(i),
            predicate: ClaimPredicate::Unconditional,
        })
        .collect();
    let err = OperationBuilder::new(CreateClaimableBalanceOp {
        asset: Asset::Native,
        amount: amount("1"),
        claimants,
    })
    .build()
    .unwrap_err();
    assert!(matches!(err, CodecError::ConstraintViolation(_)));
}

#[test]
fn oversize_manage_data_value_rejected() {
    let err = OperationBuilder::new(ManageDataOp {
        data_name: "blob".into(),
        data_value: Some(vec![0; 65]),
    })
    .build()
    .unwrap_err();
    assert!(matches!(err, CodecError::ConstraintViolation(_)));
}

#[test]
fn overlapping_trust_line_flags_rejected() {
    let err = OperationBuilder::new(SetTrustLineFlagsOp {
        trustor: account(1),
        asset: usd(),
        clear_flags: TRUSTLINE_AUTHORIZED_FLAG,
        set_flags: TRUSTLINE_AUTHORIZED_FLAG,
    })
    .build()
    .unwrap_err();
    assert!(matches!(err, CodecError::ConstraintViolation(_)));
}

// ---------------------------------------------------------------------------
// Hostile Input
// ---------------------------------------------------------------------------

#[test]
fn unknown_operation_type_returns_no_value() {
    let mut wire = vec![0, 0, 0, 0];
    wire.extend_from_slice(&99i32.to_be_bytes());
    wire.extend_from_slice(&[0u8; 40]);
    assert_eq!(
        Operation::from_xdr(&wire),
        Err(CodecError::UnknownOperationType(99))
    );
}

#[test]
fn host_function_invocation_is_not_modelled() {
    let wire = [0, 0, 0, 0, 0, 0, 0, 24];
    assert_eq!(
        Operation::from_xdr(&wire),
        Err(CodecError::UnknownOperationType(24))
    );
}

#[test]
fn every_truncation_fails() {
    for body in sample_bodies() {
        let op = OperationBuilder::new(body).build().unwrap();
        let wire = op.to_xdr().unwrap();
        for cut in 0..wire.len() {
            assert!(
                Operation::from_xdr(&wire[..cut]).is_err(),
                "{} decoded from {} of {} bytes",
                op.operation_type(),
                cut,
                wire.len()
            );
        }
    }
}

#[test]
fn trailing_bytes_rejected() {
    let op = OperationBuilder::new(OperationBody::Inflation).build().unwrap();
    let mut wire = op.to_xdr().unwrap();
    wire.extend_from_slice(&[0, 0, 0, 0]);
    assert!(matches!(
        Operation::from_xdr(&wire),
        Err(CodecError::MalformedXdr(_))
    ));
}

#[test]
fn bad_source_flag_rejected() {
    let wire = [0, 0, 0, 2, 0, 0, 0, 9];
    assert!(matches!(
        Operation::from_xdr(&wire),
        Err(CodecError::MalformedXdr(_))
    ));
}

#[test]
fn unsupported_source_key_type() {
    let mut wire = vec![0, 0, 0, 1, 0, 0, 0, 1];
    wire.extend_from_slice(&[0u8; 32]);
    wire.extend_from_slice(&[0, 0, 0, 9]);
    assert_eq!(
        Operation::from_xdr(&wire),
        Err(CodecError::UnsupportedKeyType(1))
    );
}

#[test]
fn corrupt_asset_inside_payment_is_malformed_asset() {
    let op = OperationBuilder::new(PaymentOp {
        destination: muxed(1),
        asset: usd(),
        amount: amount("1"),
    })
    .build()
    .unwrap();
    let mut wire = op.to_xdr().unwrap();
    // Asset discriminant follows source flag, type and the 36-byte account.
    wire[4 + 4 + 36 + 3] = 7;
    assert!(matches!(
        Operation::from_xdr(&wire),
        Err(CodecError::MalformedAsset(_))
    ));
}
