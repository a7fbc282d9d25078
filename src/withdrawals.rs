//! Withdrawal migration: re-fingerprints each legacy withdrawal into the
//! bedrock L2-to-L1 message passer.

use crate::alloc::GenesisAlloc;
use crate::constants::{ABI_TRUE, L2_TO_L1_MESSAGE_PASSER_ADDRESS, LEGACY_MESSAGE_PASSER_ADDRESS};
use crate::crossdomain::{migrate_withdrawal, LegacyWithdrawal};
use crate::errors::MigrationError;
use alloy_primitives::Address;
use tracing::{debug, info, warn};

/// Install a bedrock withdrawal flag for every filtered legacy withdrawal.
///
/// Each withdrawal's legacy fingerprint must be set in the legacy message
/// passer; an unset fingerprint aborts unless `no_check`, in which case the
/// entry is skipped. The legacy flags are left untouched.
pub fn migrate_withdrawals(
    alloc: &mut GenesisAlloc,
    withdrawals: &[LegacyWithdrawal],
    l1_cross_domain_messenger: Address,
    no_check: bool,
) -> Result<(), MigrationError> {
    let mut migrated = 0usize;
    for withdrawal in withdrawals {
        let legacy_slot = withdrawal.storage_slot();
        if alloc.storage_value(&LEGACY_MESSAGE_PASSER_ADDRESS, &legacy_slot) != Some(ABI_TRUE) {
            let err = MigrationError::LegacySlotNotFound { slot: legacy_slot };
            if no_check {
                warn!(%err, "skipping withdrawal without a legacy flag");
                continue;
            }
            return Err(err);
        }

        let bedrock = migrate_withdrawal(withdrawal, l1_cross_domain_messenger)?;
        let bedrock_slot = bedrock.storage_slot();
        debug!(
            legacy = %legacy_slot,
            bedrock = %bedrock_slot,
            nonce = %bedrock.nonce,
            "migrating withdrawal",
        );
        alloc.set_storage(L2_TO_L1_MESSAGE_PASSER_ADDRESS, bedrock_slot, ABI_TRUE);
        migrated += 1;
    }

    info!(count = migrated, "migrated legacy withdrawals");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::L2_CROSS_DOMAIN_MESSENGER_ADDRESS;
    use alloy_primitives::{address, Bytes, U256};

    fn l1_xdm() -> Address {
        address!("00000000000000000000000000000000000000cc")
    }

    fn sample(nonce: u64) -> LegacyWithdrawal {
        LegacyWithdrawal::new(
            L2_CROSS_DOMAIN_MESSENGER_ADDRESS,
            address!("00000000000000000000000000000000000000aa"),
            address!("00000000000000000000000000000000000000bb"),
            Bytes::from(vec![0x01, 0x02]),
            U256::from(nonce),
        )
    }

    fn alloc_with_flags(withdrawals: &[LegacyWithdrawal]) -> GenesisAlloc {
        let mut alloc = GenesisAlloc::new();
        for wd in withdrawals {
            alloc.set_storage(LEGACY_MESSAGE_PASSER_ADDRESS, wd.storage_slot(), ABI_TRUE);
        }
        alloc
    }

    #[test]
    fn test_bedrock_flag_installed() {
        let wd = sample(1);
        let mut alloc = alloc_with_flags(std::slice::from_ref(&wd));

        migrate_withdrawals(&mut alloc, &[wd.clone()], l1_xdm(), false).unwrap();

        let bedrock = migrate_withdrawal(&wd, l1_xdm()).unwrap();
        assert_eq!(
            alloc.storage_value(&L2_TO_L1_MESSAGE_PASSER_ADDRESS, &bedrock.storage_slot()),
            Some(ABI_TRUE),
        );
        // The legacy flag stays.
        assert_eq!(
            alloc.storage_value(&LEGACY_MESSAGE_PASSER_ADDRESS, &wd.storage_slot()),
            Some(ABI_TRUE),
        );
    }

    #[test]
    fn test_missing_legacy_flag_fails() {
        let wd = sample(1);
        let mut alloc = GenesisAlloc::new();

        let err = migrate_withdrawals(&mut alloc, &[wd], l1_xdm(), false).unwrap_err();
        assert!(matches!(err, MigrationError::LegacySlotNotFound { .. }));
    }

    #[test]
    fn test_missing_legacy_flag_skipped_with_no_check() {
        let present = sample(1);
        let absent = sample(2);
        let mut alloc = alloc_with_flags(std::slice::from_ref(&present));

        migrate_withdrawals(
            &mut alloc,
            &[present.clone(), absent.clone()],
            l1_xdm(),
            true,
        )
        .unwrap();

        let migrated_present = migrate_withdrawal(&present, l1_xdm()).unwrap();
        let migrated_absent = migrate_withdrawal(&absent, l1_xdm()).unwrap();
        assert_eq!(
            alloc.storage_value(
                &L2_TO_L1_MESSAGE_PASSER_ADDRESS,
                &migrated_present.storage_slot(),
            ),
            Some(ABI_TRUE),
        );
        assert_eq!(
            alloc.storage_value(
                &L2_TO_L1_MESSAGE_PASSER_ADDRESS,
                &migrated_absent.storage_slot(),
            ),
            None,
        );
    }

    #[test]
    fn test_distinct_withdrawals_get_distinct_flags() {
        let a = sample(1);
        let b = sample(2);
        let mut alloc = alloc_with_flags(&[a.clone(), b.clone()]);

        migrate_withdrawals(&mut alloc, &[a, b], l1_xdm(), false).unwrap();

        assert_eq!(
            alloc.storage_iter(&L2_TO_L1_MESSAGE_PASSER_ADDRESS).count(),
            2,
        );
    }
}
