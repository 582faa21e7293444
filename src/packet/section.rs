//! Marker types for the sections of a DNS message, used as decoder states.

mod sealed {
    pub trait Sealed: 'static {}
}

/// Trait implemented by the section marker types.
pub trait Section: sealed::Sealed {
    /// Human-readable section name, used in log output.
    const NAME: &'static str;
}

/// The *Question* section.
pub enum Question {}

/// The *Answer* section.
pub enum Answer {}

/// The *Authority* section. Records here are walked but not retained by the resolver.
pub enum Authority {}

/// The *Additional Records* section. Records here are walked but not retained by the resolver.
pub enum Additional {}

macro_rules! sections {
    ($($ty:ident => $name:literal),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Section for $ty {
                const NAME: &'static str = $name;
            }
        )+
    };
}

sections! {
    Question => "question",
    Answer => "answer",
    Authority => "authority",
    Additional => "additional",
}
