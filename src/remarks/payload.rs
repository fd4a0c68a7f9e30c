//! Remark payload formats.

use rand::Rng;

/// Upper bound (exclusive) of the random id in the block-number remark.
pub const TOKEN_ID_RANGE: u32 = 10_000;

/// `blockNumber/<N>-<T>`, with `N` in comma-grouped human form.
pub fn block_number_remark(block_number: u64, token_id: u32) -> String {
    format!("blockNumber/{}-{}", group_thousands(block_number), token_id)
}

/// `21345678` → `21,345,678`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `task_multicall/<address>`
pub fn multicall_remark(address: &str) -> String {
    format!("task_multicall/{}", address)
}

/// Random id in `0..10_000`.
pub fn next_token_id() -> u32 {
    rand::thread_rng().gen_range(0..TOKEN_ID_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_number_remark() {
        assert_eq!(block_number_remark(21_345_678, 42), "blockNumber/21,345,678-42");
        assert_eq!(block_number_remark(0, 0), "blockNumber/0-0");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(123_456), "123,456");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_multicall_remark() {
        assert_eq!(
            multicall_remark("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"),
            "task_multicall/5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"
        );
    }

    #[test]
    fn test_token_id_in_range() {
        for _ in 0..1_000 {
            assert!(next_token_id() < TOKEN_ID_RANGE);
        }
    }
}
