use proptest::prelude::*;
use sol_signer_core::instructions::programs::{compute_budget, memo};
use sol_signer_core::tx::builder::write_varint;
use sol_signer_core::tx::reader::ByteReader;
use sol_signer_core::tx::MessageBuilder;
use sol_signer_core::types::{pubkey_from_base58, Pubkey};
use sol_signer_core::{fees, ErrorCode, PropertyValue, SigningSettings, Transaction};

const PAYER: Pubkey = [7u8; 32];

fn program(id: &str) -> Pubkey {
    pubkey_from_base58(id).expect("valid program id")
}

fn unit_limit(units: u32) -> Vec<u8> {
    let mut data = vec![compute_budget::INS_SET_COMPUTE_UNIT_LIMIT as u8];
    data.extend_from_slice(&units.to_le_bytes());
    data
}

fn unit_price(micro_lamports: u64) -> Vec<u8> {
    let mut data = vec![compute_budget::INS_SET_COMPUTE_UNIT_PRICE as u8];
    data.extend_from_slice(&micro_lamports.to_le_bytes());
    data
}

/// payer, compute budget, memo
fn base_builder() -> MessageBuilder {
    MessageBuilder::legacy(1, 0, 2)
        .with_address(PAYER)
        .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID))
        .with_address(program(memo::MEMO_PROGRAM_ID))
}

fn versioned_sample() -> Vec<u8> {
    MessageBuilder::v0(1, 0, 2)
        .with_address(PAYER)
        .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID))
        .with_address(program(memo::MEMO_PROGRAM_ID))
        .with_blockhash([3u8; 32])
        .with_instruction(1, vec![], unit_limit(150_000))
        .with_instruction(2, vec![0, 3], b"lookup memo".to_vec())
        .with_lookup_table([5u8; 32], vec![1], vec![2])
        .build()
}

proptest! {
    #[test]
    fn varint_round_trips(value in any::<u32>()) {
        let mut buf = Vec::new();
        write_varint(value, &mut buf);
        prop_assert!(buf.len() <= 5);

        let mut reader = ByteReader::new(&buf);
        prop_assert_eq!(reader.read_varint().unwrap(), value);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn truncated_messages_are_malformed(cut in 0usize..1000) {
        let bytes = versioned_sample();
        let cut = cut % bytes.len();
        let err = Transaction::decode(&bytes[..cut]).unwrap_err();
        prop_assert_eq!(err.code, ErrorCode::MalformedTransaction);
    }

    #[test]
    fn appended_bytes_are_malformed(extra in prop::collection::vec(any::<u8>(), 1..8)) {
        let mut bytes = versioned_sample();
        bytes.extend_from_slice(&extra);
        prop_assert!(Transaction::decode(&bytes).is_err());
    }

    #[test]
    fn legacy_memo_round_trips(
        text in "[a-zA-Z0-9 ]{0,64}",
        blockhash in prop::array::uniform32(any::<u8>()),
    ) {
        let bytes = base_builder()
            .with_blockhash(blockhash)
            .with_instruction(2, vec![0], text.as_bytes().to_vec())
            .build();
        let tx = Transaction::decode(&bytes).unwrap();

        prop_assert!(tx.is_legacy());
        prop_assert_eq!(tx.blockhash(), &blockhash);
        prop_assert_eq!(tx.addresses().len(), 3);
        prop_assert!(!tx.blind_signing());
        prop_assert_eq!(
            tx.instructions()[0].property("memo"),
            Some(&PropertyValue::Text(text.clone()))
        );
    }

    #[test]
    fn fee_ignores_instructions_past_scan_window(
        units in any::<u32>(),
        price in any::<u64>(),
        late_price in any::<u64>(),
    ) {
        let bytes = base_builder()
            .with_instruction(1, vec![], unit_limit(units))
            .with_instruction(1, vec![], unit_price(price))
            .with_instruction(2, vec![0], b"x".to_vec())
            .with_instruction(1, vec![], unit_price(late_price))
            .build();
        let tx = Transaction::decode(&bytes).unwrap();

        let expected = 5000u128 + u128::from(price) * u128::from(units) / 1_000_000;
        prop_assert_eq!(fees::estimate_fee(&tx, &SigningSettings::default()), expected);
    }

    #[test]
    fn fee_without_compute_budget_is_base_only(signers in 1u8..6) {
        let mut builder = MessageBuilder::legacy(signers, 0, 1);
        for i in 0..signers {
            builder = builder.with_address([i + 10; 32]);
        }
        let bytes = builder
            .with_address(program(memo::MEMO_PROGRAM_ID))
            .with_instruction(signers, vec![], b"fee".to_vec())
            .build();
        let tx = Transaction::decode(&bytes).unwrap();

        prop_assert_eq!(
            fees::estimate_fee(&tx, &SigningSettings::default()),
            5000u128 * u128::from(signers)
        );
    }

    #[test]
    fn unknown_instruction_forces_blind_signing(
        data in prop::collection::vec(any::<u8>(), 0..32),
        position in 0usize..3,
    ) {
        let mut instructions = vec![
            (1u8, unit_limit(1000)),
            (2u8, b"memo".to_vec()),
        ];
        instructions.insert(position.min(instructions.len()), (3u8, data));

        let mut builder = MessageBuilder::legacy(1, 0, 3)
            .with_address(PAYER)
            .with_address(program(compute_budget::COMPUTE_BUDGET_PROGRAM_ID))
            .with_address(program(memo::MEMO_PROGRAM_ID))
            .with_address([99u8; 32]);
        for (program_index, data) in instructions {
            builder = builder.with_instruction(program_index, vec![], data);
        }
        let tx = Transaction::decode(&builder.build()).unwrap();

        prop_assert!(tx.blind_signing());
    }
}
