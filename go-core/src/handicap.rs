use crate::point::Point;

/// Maximum number of handicap stones for a square board.
pub fn max_handicap(size: u8) -> u8 {
    if size < 7 || size.is_multiple_of(2) {
        return 0;
    }
    if size >= 13 {
        9
    } else {
        // Only corners and center below 13x13
        5
    }
}

/// Hoshi-based handicap stone placement for any odd board >= 7.
///
/// Returns `None` if the board is even, too small, or `count` is out of
/// range.
pub fn handicap_points(size: u8, count: u8) -> Option<Vec<Point>> {
    if count < 2 || count > max_handicap(size) {
        return None;
    }

    let off = if size >= 13 { 3 } else { 2 };
    let far = size - 1 - off;
    let mid = size / 2;

    let p = Point::new;
    let (lower_left, lower_right) = (p(off, off), p(far, off));
    let (upper_left, upper_right) = (p(off, far), p(far, far));
    let center = p(mid, mid);
    let (mid_left, mid_right) = (p(off, mid), p(far, mid));
    let (mid_lower, mid_upper) = (p(mid, off), p(mid, far));

    let points = match count {
        2 => vec![upper_right, lower_left],
        3 => vec![upper_right, lower_left, lower_right],
        4 => vec![upper_right, lower_left, lower_right, upper_left],
        5 => vec![upper_right, lower_left, lower_right, upper_left, center],
        6 => vec![upper_right, lower_left, lower_right, upper_left, mid_left, mid_right],
        7 => vec![upper_right, lower_left, lower_right, upper_left, mid_left, mid_right, center],
        8 => vec![
            upper_right, lower_left, lower_right, upper_left, mid_left, mid_right, mid_lower,
            mid_upper,
        ],
        _ => vec![
            upper_right, lower_left, lower_right, upper_left, mid_left, mid_right, mid_lower,
            mid_upper, center,
        ],
    };
    Some(points)
}
