use crate::error::{Error, Result};
use plotters::style::RGBColor;

/// Fixed list of colors, indexed cyclically by cluster index.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<RGBColor>
}
impl Palette {
    /// ## Errors
    /// [`Error::InvalidParameter`] for an empty color list.
    pub fn new(colors: Vec<RGBColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::invalid("palette", "at least one color is required"));
        }
        Ok(Self { colors })
    }

    /// Parse a palette from `#RRGGBB` strings.
    pub fn from_hex(colors: &[&str]) -> Result<Self> {
        Self::new(colors.iter().map(|c| parse_hex(c)).collect::<Result<Vec<_>>>()?)
    }

    /// Color of cluster **index**. Repeats cyclically when there are more clusters than colors.
    pub fn color(&self, index: usize) -> RGBColor {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize { self.colors.len() }
}

/// Default palette for observations assigned to a cluster.
pub(crate) fn default_assigned() -> Palette {
    Palette { colors: vec![RGBColor(0xBB, 0, 0), RGBColor(0, 0xBB, 0), RGBColor(0, 0, 0xBB)] }
}

/// Default palette for the centroids themselves.
pub(crate) fn default_self() -> Palette {
    Palette { colors: vec![RGBColor(0xFF, 0, 0), RGBColor(0, 0xFF, 0), RGBColor(0, 0xFF, 0xFF)] }
}

pub(crate) fn parse_hex(s: &str) -> Result<RGBColor> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    let channel = |i: usize| digits.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => Ok(RGBColor(r, g, b)),
        _ => Err(Error::invalid("palette", format!("not a #RRGGBB color: {:?}", s)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_repeat_cyclically() {
        let palette = default_assigned();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.color(0), RGBColor(0xBB, 0, 0));
        assert_eq!(palette.color(3), palette.color(0));
        assert_eq!(palette.color(7), palette.color(1));
    }

    #[test]
    fn hex_parsing() {
        let palette = Palette::from_hex(&["#BB0000", "00ff00", "#00FFFF"]).unwrap();
        assert_eq!(palette.color(1), RGBColor(0, 0xFF, 0));
        assert_eq!(palette.color(2), default_self().color(2));
        assert!(Palette::from_hex(&["#BB00"]).is_err());
        assert!(Palette::from_hex(&["#GG0000"]).is_err());
        assert!(Palette::from_hex(&["#ÄÄ0000"]).is_err());
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(Palette::new(Vec::new()).is_err());
    }
}
