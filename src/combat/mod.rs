//! Combat system

pub mod abilities;
pub mod fighter;

pub use abilities::{AbilityEnchant, AbilityKind, ScalingStat, TargetSpec};
pub use fighter::Fighter;

/// Mitigate a raw damage roll against a defense value:
/// `ceil(roll * 100 / (100 + defense))`.
///
/// Defense scales damage down with diminishing returns instead of
/// subtracting, so a weak hit on a fortress still rounds up to 1.
pub fn mitigate(roll: i32, defense: i32) -> i32 {
    if roll <= 0 {
        return roll;
    }
    let numerator = roll * 100;
    let denominator = 100 + defense.max(0);
    // ceiling division on positive integers
    (numerator + denominator - 1) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mitigation_formula() {
        assert_eq!(mitigate(10, 0), 10);
        assert_eq!(mitigate(10, 100), 5); // ceil(1000/200)
        assert_eq!(mitigate(1, 300), 1); // ceil(100/400) = 1
        assert_eq!(mitigate(7, 40), 5); // ceil(700/140)
    }

    #[test]
    fn non_positive_rolls_pass_through() {
        assert_eq!(mitigate(0, 50), 0);
        assert_eq!(mitigate(-3, 50), -3);
    }
}
