use strum_macros::{Display, EnumIter, EnumString};

/// Identifier of a physical buffer slot serviced by the AMR fleet.
///
/// The universe is fixed; parsing accepts any letter case and renders the
/// canonical upper-case name used by the feed, the status log and the fleet API.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SlotId {
    #[strum(serialize = "AMR01")]
    Amr01,
    #[strum(serialize = "AMR02")]
    Amr02,
    #[strum(serialize = "AMR03")]
    Amr03,
    #[strum(serialize = "AMR04")]
    Amr04,
    #[strum(serialize = "AMR05")]
    Amr05,
    #[strum(serialize = "AMR06")]
    Amr06,
    #[strum(serialize = "AMR07")]
    Amr07,
    #[strum(serialize = "AMR08")]
    Amr08,
    #[strum(serialize = "AMR09")]
    Amr09,
    #[strum(serialize = "AMR10")]
    Amr10,
    #[strum(serialize = "AMR11")]
    Amr11,
    #[strum(serialize = "AMR12")]
    Amr12,
    #[strum(serialize = "AMR13")]
    Amr13,
    #[strum(serialize = "AMR14")]
    Amr14,
}
