/// Cost of a diagonal step: `floor(base * 3 / 2)`.
pub const fn diagonal_cost(base: u32) -> u32 {
    base.saturating_mul(3) / 2
}

/// Renders a fragment count as whole points plus a reduced fraction.
///
/// With three fragments per point, 4 renders as `"1 1/3"`, 2 as `"2/3"` and
/// 0 as `"0"`.
pub fn move_points_text(fragments: u32, move_fragments: u32) -> String {
    if move_fragments == 0 {
        return fragments.to_string();
    }
    let whole = fragments / move_fragments;
    let rem = fragments % move_fragments;
    if rem == 0 {
        return whole.to_string();
    }
    let divisor = gcd(rem, move_fragments);
    let fraction = format!("{}/{}", rem / divisor, move_fragments / divisor);
    if whole == 0 {
        fraction
    } else {
        format!("{whole} {fraction}")
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_costs_floor() {
        assert_eq!(diagonal_cost(3), 4);
        assert_eq!(diagonal_cost(6), 9);
        assert_eq!(diagonal_cost(9), 13);
        assert_eq!(diagonal_cost(1), 1);
        assert_eq!(diagonal_cost(0), 0);
    }

    #[test]
    fn fractions_are_reduced() {
        assert_eq!(move_points_text(4, 3), "1 1/3");
        assert_eq!(move_points_text(2, 3), "2/3");
        assert_eq!(move_points_text(0, 3), "0");
        assert_eq!(move_points_text(9, 3), "3");
        assert_eq!(move_points_text(6, 9), "2/3");
        assert_eq!(move_points_text(15, 6), "2 1/2");
    }
}
