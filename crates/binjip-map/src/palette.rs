//! Sequential colour scale for the choropleth

/// ColorBrewer "Greens", 7 classes, light to dark
pub const GREENS: [&str; 7] = [
    "#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32",
];

/// Colour of `bin` when the binning has `bin_count` bins.
///
/// Bins are spread over the whole scale so the top bin is always the darkest.
pub fn color_for_bin(bin: usize, bin_count: usize) -> &'static str {
    let last = GREENS.len() - 1;
    if bin_count <= 1 {
        return GREENS[0];
    }
    let index = bin.min(bin_count - 1) * last / (bin_count - 1);
    GREENS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scale() {
        for bin in 0..7 {
            assert_eq!(color_for_bin(bin, 7), GREENS[bin]);
        }
    }

    #[test]
    fn test_single_bin_is_lightest() {
        assert_eq!(color_for_bin(0, 1), "#edf8e9");
        assert_eq!(color_for_bin(0, 0), "#edf8e9");
    }

    #[test]
    fn test_fewer_bins_spread_to_ends() {
        assert_eq!(color_for_bin(0, 3), GREENS[0]);
        assert_eq!(color_for_bin(1, 3), GREENS[3]);
        assert_eq!(color_for_bin(2, 3), GREENS[6]);
    }

    #[test]
    fn test_out_of_range_bin_clamps() {
        assert_eq!(color_for_bin(9, 4), GREENS[6]);
    }
}
