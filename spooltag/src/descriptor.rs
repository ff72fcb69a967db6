use super::*;

/// Manufacture date reported when a tag carries none.
pub const DEFAULT_MF_DATE: &str = "19700101";

const MAX_COLORS: usize = 5;
const WHITE: (u32, u8) = (0xFFFFFF, 0xFF);

/// The canonical filament record handed to the printer firmware.
///
/// Fields that a tag format cannot express are left at zero. Temperatures are
/// in °C, `diameter` is in hundredths of a millimetre and `weight` in grams.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub struct FilamentDescriptor {
    pub version: u32,
    pub vendor: String,
    pub manufacturer: String,
    pub main_type: MaterialType,
    pub sub_type: SubType,
    pub tray: u32,
    pub color_nums: u8,
    pub alpha: u8,
    pub rgb_1: u32,
    pub rgb_2: u32,
    pub rgb_3: u32,
    pub rgb_4: u32,
    pub rgb_5: u32,
    pub argb_color: u32,
    pub diameter: u32,
    pub weight: u32,
    pub length: u32,
    pub drying_temp: u32,
    pub drying_time: u32,
    pub hotend_min_temp: i32,
    pub hotend_max_temp: i32,
    pub bed_temp: i32,
    pub bed_type: u32,
    pub first_layer_temp: i32,
    pub other_layer_temp: i32,
    pub sku: u64,
    /// `YYYYMMDD`
    pub mf_date: String,
    pub rsa_key_version: u32,
    pub official: bool,
    pub card_uid: Vec<u8>,
}

impl FilamentDescriptor {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// The populated `rgb_*` values, primary first.
    pub fn colors(&self) -> impl Iterator<Item = u32> + '_ {
        [self.rgb_1, self.rgb_2, self.rgb_3, self.rgb_4, self.rgb_5]
            .into_iter()
            .take(self.color_nums as usize)
    }
}

impl core::fmt::Display for FilamentDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Vendor: {}", self.vendor)?;
        writeln!(f, "Manufacturer: {}", self.manufacturer)?;
        writeln!(f, "Material: {} ({})", self.main_type, self.sub_type)?;
        write!(f, "Colors:")?;
        for rgb in self.colors() {
            write!(f, " #{rgb:06X}")?;
        }
        writeln!(f, " (alpha {:#04x}, ARGB {:#010x})", self.alpha, self.argb_color)?;
        writeln!(
            f,
            "Diameter: {}.{:02} mm",
            self.diameter / 100,
            self.diameter % 100
        )?;
        writeln!(f, "Weight: {} g", self.weight)?;
        writeln!(
            f,
            "Hotend: {}-{} °C",
            self.hotend_min_temp, self.hotend_max_temp
        )?;
        writeln!(f, "Bed: {} °C", self.bed_temp)?;
        writeln!(f, "SKU: {}", self.sku)?;
        write!(f, "Manufactured: {}", self.mf_date)?;
        if !self.card_uid.is_empty() {
            write!(f, "\nCard UID: ")?;
            for b in &self.card_uid {
                write!(f, "{b:02X}")?;
            }
        }
        Ok(())
    }
}

/// Assembles a [`FilamentDescriptor`], applying defaults for anything not set.
///
/// `build` derives the dependent fields: the colour count, the overall alpha
/// and ARGB value from the primary colour, and the layer temperatures from
/// the minimum hotend temperature.
#[derive(Debug, Clone)]
pub struct Builder {
    vendor: String,
    main_type: MaterialType,
    sub_type: SubType,
    colors: Vec<(u32, u8)>,
    diameter: u32,
    weight: u32,
    hotend_temps: (i32, i32),
    bed_temp: i32,
    sku: u64,
    mf_date: String,
    card_uid: Vec<u8>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            vendor: String::new(),
            main_type: MaterialType::Reserved,
            sub_type: SubType::Reserved,
            colors: Vec::new(),
            diameter: 0,
            weight: 0,
            hotend_temps: (0, 0),
            bed_temp: 0,
            sku: 0,
            mf_date: DEFAULT_MF_DATE.to_string(),
            card_uid: Vec::new(),
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets both the vendor and the manufacturer.
    pub fn vendor(&mut self, vendor: impl Into<String>) -> &mut Self {
        self.vendor = vendor.into();
        self
    }

    pub fn main_type(&mut self, main_type: MaterialType) -> &mut Self {
        self.main_type = main_type;
        self
    }

    pub fn sub_type(&mut self, sub_type: SubType) -> &mut Self {
        self.sub_type = sub_type;
        self
    }

    /// Append a colour. Colours beyond the fifth are ignored.
    pub fn add_color(&mut self, rgb: u32, alpha: u8) -> &mut Self {
        if self.colors.len() < MAX_COLORS {
            self.colors.push((rgb & 0xFFFFFF, alpha));
        }
        self
    }

    pub fn diameter(&mut self, hundredths_mm: u32) -> &mut Self {
        self.diameter = hundredths_mm;
        self
    }

    pub fn weight(&mut self, grams: u32) -> &mut Self {
        self.weight = grams;
        self
    }

    pub fn hotend_temps(&mut self, min: i32, max: i32) -> &mut Self {
        self.hotend_temps = (min, max);
        self
    }

    pub fn bed_temp(&mut self, bed_temp: i32) -> &mut Self {
        self.bed_temp = bed_temp;
        self
    }

    pub fn sku(&mut self, sku: u64) -> &mut Self {
        self.sku = sku;
        self
    }

    pub fn mf_date(&mut self, mf_date: impl Into<String>) -> &mut Self {
        self.mf_date = mf_date.into();
        self
    }

    pub fn card_uid(&mut self, card_uid: impl Into<Vec<u8>>) -> &mut Self {
        self.card_uid = card_uid.into();
        self
    }

    pub fn build(mut self) -> FilamentDescriptor {
        if self.colors.is_empty() {
            self.colors.push(WHITE);
        }
        let rgb = |i: usize| self.colors.get(i).map_or(0, |c| c.0);
        let (primary, alpha) = self.colors[0];
        let (hotend_min_temp, hotend_max_temp) = self.hotend_temps;

        FilamentDescriptor {
            version: 1,
            manufacturer: self.vendor.clone(),
            vendor: self.vendor,
            main_type: self.main_type,
            sub_type: self.sub_type,
            tray: 0,
            color_nums: self.colors.len() as u8,
            alpha,
            rgb_1: rgb(0),
            rgb_2: rgb(1),
            rgb_3: rgb(2),
            rgb_4: rgb(3),
            rgb_5: rgb(4),
            argb_color: ((alpha as u32) << 24) | primary,
            diameter: self.diameter,
            weight: self.weight,
            length: 0,
            drying_temp: 0,
            drying_time: 0,
            hotend_min_temp,
            hotend_max_temp,
            bed_temp: self.bed_temp,
            bed_type: 0,
            first_layer_temp: hotend_min_temp,
            other_layer_temp: hotend_min_temp,
            sku: self.sku,
            mf_date: self.mf_date,
            rsa_key_version: 0,
            official: true,
            card_uid: self.card_uid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let d = Builder::new().build();
        assert_eq!(1, d.version);
        assert_eq!(1, d.color_nums);
        assert_eq!(0xFF, d.alpha);
        assert_eq!(0xFFFFFF, d.rgb_1);
        assert_eq!(0, d.rgb_2);
        assert_eq!(0xFFFFFFFF, d.argb_color);
        assert_eq!(MaterialType::Reserved, d.main_type);
        assert_eq!(SubType::Reserved, d.sub_type);
        assert_eq!(DEFAULT_MF_DATE, d.mf_date);
        assert!(d.official);
        assert!(d.card_uid.is_empty());
    }

    #[test]
    fn derived_fields() {
        let mut b = FilamentDescriptor::builder();
        b.vendor("Prusament")
            .main_type(MaterialType::PETG)
            .sub_type(SubType::Basic)
            .add_color(0x112233, 0x80)
            .add_color(0x445566, 0xFF)
            .hotend_temps(230, 250)
            .bed_temp(85);
        for _ in 0..5 {
            b.add_color(0x000000, 0xFF);
        }
        let d = b.build();

        assert_eq!("Prusament", d.vendor);
        assert_eq!("Prusament", d.manufacturer);
        assert_eq!(5, d.color_nums);
        assert_eq!(0x80, d.alpha);
        assert_eq!(0x112233, d.rgb_1);
        assert_eq!(0x445566, d.rgb_2);
        assert_eq!(0x80112233, d.argb_color);
        assert_eq!(230, d.first_layer_temp);
        assert_eq!(230, d.other_layer_temp);
        assert_eq!(250, d.hotend_max_temp);
        assert_eq!(
            vec![0x112233, 0x445566, 0, 0, 0],
            d.colors().collect::<Vec<_>>()
        );
    }

    #[test]
    fn display() {
        let mut b = Builder::new();
        b.vendor("Generic")
            .main_type(MaterialType::PLA)
            .add_color(0x00FF00, 0xFF)
            .diameter(175)
            .card_uid(vec![0x04, 0xA1]);
        let text = b.build().to_string();
        assert!(text.contains("Material: PLA (Reserved)"));
        assert!(text.contains("#00FF00"));
        assert!(text.contains("Diameter: 1.75 mm"));
        assert!(text.ends_with("Card UID: 04A1"));
    }
}
