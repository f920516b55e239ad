//! Parsing modes that change how permissive value grammars are.

/// The context a stylesheet or attribute value is parsed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParserMode {
    /// Author stylesheets and style attributes in standards mode.
    #[default]
    HtmlStandard,
    /// Documents in quirks mode: hashless hex colors and unitless lengths are accepted.
    HtmlQuirks,
    /// SVG presentation attributes: unitless numbers are user units.
    SvgAttribute,
    /// The user agent stylesheet, which may use internal-only syntax.
    UaSheet,
}

impl ParserMode {
    #[inline]
    pub const fn is_quirks(self) -> bool {
        matches!(self, Self::HtmlQuirks)
    }

    #[inline]
    pub const fn is_svg_attribute(self) -> bool {
        matches!(self, Self::SvgAttribute)
    }

    #[inline]
    pub const fn is_ua_sheet(self) -> bool {
        matches!(self, Self::UaSheet)
    }
}
