macro_rules! material_types {
    ($($id:literal => $variant:ident),* $(,)?) => {
        /// Base filament material.
        ///
        /// The numeric ids are those used by the OpenPrintTag `material_type`
        /// field; anything unrecognised decodes as `Reserved`.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(into = "&'static str", from = "String")
        )]
        pub enum MaterialType {
            $($variant,)*
            Reserved,
        }

        impl MaterialType {
            pub const ALL: &'static [MaterialType] = &[$(MaterialType::$variant),*];

            pub fn from_id(id: u64) -> Self {
                match id {
                    $($id => MaterialType::$variant,)*
                    _ => MaterialType::Reserved,
                }
            }

            pub fn id(&self) -> Option<u64> {
                match self {
                    $(MaterialType::$variant => Some($id),)*
                    MaterialType::Reserved => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(MaterialType::$variant => stringify!($variant),)*
                    MaterialType::Reserved => "Reserved",
                }
            }
        }
    };
}

material_types! {
    0 => PLA,
    1 => PETG,
    2 => TPU,
    3 => ABS,
    4 => ASA,
    5 => PC,
    6 => PCTG,
    7 => PP,
    8 => PA6,
    9 => PA11,
    10 => PA12,
    11 => PA66,
    12 => CPE,
    13 => TPE,
    14 => HIPS,
    15 => PHA,
    16 => PET,
    17 => PEI,
    18 => PBT,
    19 => PVB,
    20 => PVA,
    21 => PEKK,
    22 => PEEK,
    23 => BVOH,
    24 => TPC,
    25 => PPS,
    26 => PPSU,
    27 => PVC,
    28 => PEBA,
    29 => PVDF,
    30 => PPA,
    31 => PCL,
    32 => PES,
    33 => PMMA,
    34 => POM,
    35 => PPE,
    36 => PS,
    37 => PSU,
    38 => TPI,
    39 => SBS,
    40 => OBC,
}

impl MaterialType {
    /// Match an exact material name, e.g. `"PETG"`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .find(|m| m.as_str() == name)
            .copied()
            .unwrap_or(MaterialType::Reserved)
    }
}

impl From<MaterialType> for &'static str {
    fn from(value: MaterialType) -> Self {
        value.as_str()
    }
}

impl From<String> for MaterialType {
    fn from(value: String) -> Self {
        MaterialType::from_name(&value)
    }
}

impl core::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for MaterialType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Finish or variant of the base material.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "&'static str", from = "String")
)]
pub enum SubType {
    Basic,
    Matte,
    #[default]
    Reserved,
}

impl SubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubType::Basic => "Basic",
            SubType::Matte => "Matte",
            SubType::Reserved => "Reserved",
        }
    }
}

impl From<SubType> for &'static str {
    fn from(value: SubType) -> Self {
        value.as_str()
    }
}

impl From<String> for SubType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Basic" => SubType::Basic,
            "Matte" => SubType::Matte,
            _ => SubType::Reserved,
        }
    }
}

impl core::fmt::Display for SubType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for SubType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
