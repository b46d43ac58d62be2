//! # Adversarial Payloads
//!
//! Attack surface: every length and count in an attestation is chosen by
//! whoever produced the bytes.
//!
//! | Attack | Expected rejection |
//! |--------|--------------------|
//! | Truncation at any offset | `TruncatedPayload` |
//! | Length prefix past end of buffer | `TruncatedPayload` |
//! | Argument count `2^32 - 1` | `ResourceLimitExceeded` before allocation |
//! | Oversized ABI array heads | `ResourceLimitExceeded` before allocation |
//! | Aliased ABI offsets | `MalformedValue` before the ABI library decodes |
//! | Appended garbage | `TrailingBytes` |
//! | Random bytes | Any typed error, never a panic |

#[cfg(test)]
mod tests {
    use crate::init_test_tracing;
    use ethereum_types::U256;
    use oracle_attestation_codec::algorithms::encode_query_result;
    use oracle_attestation_codec::{
        AttestationCodecApi, AttestationCodecService, AttestationPayload, CanonicalValue,
        CanonicalValueCodec, CodecError, DatapointRow, EthAbiCodec, Field, QueryResult, Resource,
        ResultPayload, ValueLocation,
    };
    use proptest::prelude::*;

    fn service() -> AttestationCodecService<CanonicalValueCodec, EthAbiCodec> {
        init_test_tracing();
        AttestationCodecService::default()
    }

    fn payload() -> AttestationPayload {
        AttestationPayload {
            version: 1,
            algorithm: 0,
            block_height: 7,
            data_provider: format!("0x{}", "ee".repeat(20)),
            stream_id: "x".repeat(32),
            action_id: 2,
            arguments: vec![CanonicalValue::from("a"), CanonicalValue::Int64(-1)],
            result: ResultPayload::DatapointSeries(vec![DatapointRow::new("10", "0.25")]),
        }
    }

    fn word(value: U256) -> [u8; 32] {
        let mut out = [0u8; 32];
        value.to_big_endian(&mut out);
        out
    }

    /// Hand-built attestation with arbitrary argument and result blobs.
    fn frame(action_id: u16, arguments: &[u8], result: &[u8]) -> Vec<u8> {
        let mut out = vec![1, 0];
        out.extend_from_slice(&0u64.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&action_id.to_be_bytes());
        out.extend_from_slice(&(arguments.len() as u32).to_be_bytes());
        out.extend_from_slice(arguments);
        out.extend_from_slice(&(result.len() as u32).to_be_bytes());
        out.extend_from_slice(result);
        out
    }

    // =============================================================================
    // TRUNCATION
    // =============================================================================

    #[test]
    fn test_truncation_at_every_boundary() {
        let svc = service();
        let bytes = svc.encode_attestation(&payload()).unwrap();
        for len in 0..bytes.len() {
            let full = svc.parse_attestation(&bytes[..len]).unwrap_err();
            let fast = svc.parse_attestation_result(&bytes[..len]).unwrap_err();
            assert!(
                matches!(full, CodecError::TruncatedPayload { .. }),
                "len {len}: {full}"
            );
            assert_eq!(full, fast, "len {len}");
        }
    }

    #[test]
    fn test_length_prefix_past_end() {
        let svc = service();
        let mut bytes = svc.encode_attestation(&payload()).unwrap();
        // Data provider length prefix starts after the 10-byte fixed header.
        bytes[10..14].copy_from_slice(&u32::MAX.to_be_bytes());
        let err = svc.parse_attestation(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::TruncatedPayload {
                field: Field::DataProvider,
                needed: 4_294_967_295,
                ..
            }
        ));
        assert_eq!(svc.parse_attestation_result(&bytes).unwrap_err(), err);
    }

    #[test]
    fn test_signed_attestation_too_short() {
        let svc = service();
        assert!(matches!(
            svc.parse_signed_attestation(&[0u8; 64]),
            Err(CodecError::TruncatedPayload {
                field: Field::Signature,
                needed: 65,
                available: 64,
            })
        ));
    }

    #[test]
    fn test_trailing_garbage() {
        let svc = service();
        let mut bytes = svc.encode_attestation(&payload()).unwrap();
        bytes.extend_from_slice(b"junk");
        assert!(matches!(
            svc.parse_attestation(&bytes),
            Err(CodecError::TrailingBytes { count: 4, .. })
        ));
    }

    // =============================================================================
    // RESOURCE EXHAUSTION
    // =============================================================================

    #[test]
    fn test_max_u32_argument_count() {
        let svc = service();
        let blob = u32::MAX.to_le_bytes();
        let expected = CodecError::ResourceLimitExceeded {
            resource: Resource::Arguments,
            declared: u64::from(u32::MAX),
            max: 10,
        };
        assert_eq!(svc.decode_arguments(&blob).unwrap_err(), expected);

        let bytes = frame(1, &blob, &[]);
        assert_eq!(svc.parse_attestation(&bytes).unwrap_err(), expected);
        assert_eq!(svc.parse_attestation_result(&bytes).unwrap_err(), expected);
    }

    #[test]
    fn test_argument_length_past_end() {
        let svc = service();
        let mut blob = 1u32.to_le_bytes().to_vec();
        blob.extend_from_slice(&1_000u32.to_le_bytes());
        blob.push(0x00);
        assert!(matches!(
            svc.decode_arguments(&blob),
            Err(CodecError::TruncatedPayload {
                field: Field::ArgumentValue(0),
                needed: 1_000,
                available: 1,
            })
        ));
    }

    #[test]
    fn test_oversized_series_row_count() {
        let svc = service();
        let mut result = Vec::new();
        result.extend_from_slice(&word(U256::from(64)));
        result.extend_from_slice(&word(U256::from(96)));
        result.extend_from_slice(&word(U256::MAX));
        result.extend_from_slice(&word(U256::zero()));
        assert!(matches!(
            svc.decode_result(1, &result),
            Err(CodecError::ResourceLimitExceeded {
                resource: Resource::Rows,
                declared: u64::MAX,
                max: 100_000,
            })
        ));
    }

    #[test]
    fn test_oversized_query_result_row_count() {
        let svc = service();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&word(U256::from(32)));
        bytes.extend_from_slice(&word(U256::from(100_001)));
        assert!(matches!(
            svc.decode_query_result(&bytes),
            Err(CodecError::ResourceLimitExceeded {
                resource: Resource::Rows,
                declared: 100_001,
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_query_result_column_count() {
        let svc = service();
        let wide = QueryResult {
            rows: vec![vec![CanonicalValue::Null; 5]],
        };
        let bytes = encode_query_result(&wide, &CanonicalValueCodec, &EthAbiCodec).unwrap();
        assert!(matches!(
            svc.decode_query_result(&bytes),
            Err(CodecError::ResourceLimitExceeded {
                resource: Resource::Columns,
                declared: 5,
                max: 2,
            })
        ));
    }

    fn words(values: &[u64]) -> Vec<u8> {
        values
            .iter()
            .flat_map(|v| word(U256::from(*v)))
            .collect()
    }

    #[test]
    fn test_aliased_query_result_cells() {
        // One row of two cells, both heads pointing at one 64 KiB `bytes` tail.
        let blob_len = 64 * 1024;
        let mut bytes = words(&[0x20, 1, 0x20, 2, 0x40, 0x40, blob_len]);
        bytes.resize(bytes.len() + blob_len as usize, 0);
        let err = service().decode_query_result(&bytes).unwrap_err();
        assert!(
            matches!(
                err,
                CodecError::MalformedValue {
                    location: ValueLocation::Field(Field::QueryResult),
                    ..
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn test_many_aliased_cells_hit_column_cap_first() {
        // 2,000 cell heads sharing one 64 KiB tail.
        let cells = 2_000u64;
        let blob_len = 64 * 1024;
        let mut heads = vec![0x20, 1, 0x20, cells];
        heads.extend(std::iter::repeat(cells * 32).take(cells as usize));
        heads.push(blob_len);
        let mut bytes = words(&heads);
        bytes.resize(bytes.len() + blob_len as usize, 0);
        assert_eq!(
            service().decode_query_result(&bytes).unwrap_err(),
            CodecError::ResourceLimitExceeded {
                resource: Resource::Columns,
                declared: cells,
                max: 2,
            }
        );
    }

    #[test]
    fn test_aliased_query_result_rows() {
        // Many rows sharing one inner array must not pass both caps.
        let rows = 1_000u64;
        let mut heads = vec![0x20, rows];
        heads.extend(std::iter::repeat(rows * 32).take(rows as usize));
        heads.extend([1, 0x20, 1, 0]);
        let err = service().decode_query_result(&words(&heads)).unwrap_err();
        assert!(matches!(err, CodecError::MalformedValue { .. }), "{err}");
    }

    #[test]
    fn test_abi_offset_past_end() {
        let svc = service();
        let mut result = Vec::new();
        result.extend_from_slice(&word(U256::from(u64::MAX)));
        result.extend_from_slice(&word(U256::from(64)));
        assert!(matches!(
            svc.decode_result(1, &result),
            Err(CodecError::TruncatedPayload { .. })
        ));
    }

    // =============================================================================
    // RANDOM INPUT
    // =============================================================================

    /// Word-aligned buffers dominated by small offsets and lengths, so the
    /// ABI walkers get past the first head most of the time.
    fn abi_like_bytes() -> impl Strategy<Value = Vec<u8>> {
        let word_value = prop_oneof![
            4 => prop::sample::select(vec![0u64, 1, 2, 0x20, 0x40, 0x60, 0x80]),
            1 => any::<u64>(),
        ];
        (
            prop::collection::vec(word_value, 0..24),
            prop::collection::vec(any::<u8>(), 0..32),
        )
            .prop_map(|(values, tail)| {
                let mut bytes = words(&values);
                bytes.extend(tail);
                bytes
            })
    }

    proptest! {
        #[test]
        fn prop_random_attestation_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let svc = AttestationCodecService::default();
            let full = svc.parse_attestation(&bytes);
            let fast = svc.parse_attestation_result(&bytes);
            if let Ok(payload) = &full {
                prop_assert_eq!(fast.unwrap().action_id, payload.action_id);
            }
        }

        #[test]
        fn prop_random_arguments_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let svc = AttestationCodecService::default();
            let _ = svc.decode_arguments(&bytes);
        }

        #[test]
        fn prop_random_result_never_panics(
            action_id in prop::sample::select(vec![1u16, 6]),
            bytes in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let svc = AttestationCodecService::default();
            let _ = svc.decode_result(action_id, &bytes);
        }

        #[test]
        fn prop_random_query_components_never_panic(bytes in abi_like_bytes()) {
            let svc = AttestationCodecService::default();
            let _ = svc.decode_query_components(&bytes);
        }

        #[test]
        fn prop_random_query_result_never_panics(bytes in abi_like_bytes()) {
            let svc = AttestationCodecService::default();
            if let Ok(result) = svc.decode_query_result(&bytes) {
                prop_assert!(result.rows.iter().all(|row| row.len() <= 2));
                prop_assert!(result.len() <= bytes.len() / 32);
            }
        }

        #[test]
        fn prop_bit_flip_fails_consistently(
            flip_at in any::<prop::sample::Index>(),
            mask in 1u8..=255,
        ) {
            let svc = AttestationCodecService::default();
            let mut bytes = svc.encode_attestation(&payload()).unwrap();
            let index = flip_at.index(bytes.len());
            bytes[index] ^= mask;
            if let (Err(full), Err(fast)) =
                (svc.parse_attestation(&bytes), svc.parse_attestation_result(&bytes))
            {
                if matches!(full, CodecError::TruncatedPayload { .. } | CodecError::TrailingBytes { .. }) {
                    prop_assert_eq!(full, fast);
                }
            }
        }
    }
}
