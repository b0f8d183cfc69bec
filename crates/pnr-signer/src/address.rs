use alloy_primitives::Address;

use crate::error::SignerError;

/// Parse a 20-byte account address the way Ethereum wallets accept them.
///
/// The `0x` prefix is optional. All-lowercase and all-uppercase digits are
/// taken as-is; mixed case must be a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, SignerError> {
    let body = input.strip_prefix("0x").unwrap_or(input);
    if body.len() != 40 {
        return Err(SignerError::InvalidUser(format!(
            "expected 40 hex digits, got {}",
            body.len()
        )));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(body, &mut bytes)
        .map_err(|e| SignerError::InvalidUser(format!("invalid hex: {e}")))?;
    let address = Address::from(bytes);

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = address.to_checksum(None);
        if checksummed[2..] != *body {
            return Err(SignerError::InvalidUser("bad EIP-55 checksum".to_string()));
        }
    }

    Ok(address)
}
