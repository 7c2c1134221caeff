//! Account Resolver
//!
//! Instructions index into one combined list: inline addresses first, then
//! lookup-table writable references, then lookup-table read-only references.

use crate::types::{Account, Address, AddressReference};

/// Build the combined, order-preserving account list
pub fn combined_accounts(
    addresses: &[Address],
    lookup_writable: &[AddressReference],
    lookup_readonly: &[AddressReference],
) -> Vec<Account> {
    let mut accounts =
        Vec::with_capacity(addresses.len() + lookup_writable.len() + lookup_readonly.len());

    accounts.extend(addresses.iter().copied().map(Account::Inline));
    accounts.extend(lookup_writable.iter().copied().map(Account::Lookup));
    accounts.extend(lookup_readonly.iter().copied().map(Account::Lookup));

    accounts
}
