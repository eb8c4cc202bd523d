// ---------------------------------------------------------------------------
// Sector – the closed set of NACE Rev 2 sectors with a localized label
// ---------------------------------------------------------------------------

/// Industry sectors that carry an Indonesian display label.
///
/// Any raw label outside this set is shown unchanged; see [`display_sector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sector {
    FoodProducts,
    Textiles,
    WearingApparel,
    Wood,
    Paper,
    Chemicals,
    RubberPlastic,
    NonMetallicMinerals,
    BasicMetals,
    FabricatedMetal,
    ElectricalEquipment,
    MotorVehicles,
    Furniture,
    Mining,
}

impl Sector {
    pub const ALL: [Sector; 14] = [
        Sector::FoodProducts,
        Sector::Textiles,
        Sector::WearingApparel,
        Sector::Wood,
        Sector::Paper,
        Sector::Chemicals,
        Sector::RubberPlastic,
        Sector::NonMetallicMinerals,
        Sector::BasicMetals,
        Sector::FabricatedMetal,
        Sector::ElectricalEquipment,
        Sector::MotorVehicles,
        Sector::Furniture,
        Sector::Mining,
    ];

    /// Label as it appears in the `Industry Sector NACE Rev 2` column.
    pub fn raw_label(self) -> &'static str {
        match self {
            Sector::FoodProducts => "Food products (10)",
            Sector::Textiles => "Textiles (13)",
            Sector::WearingApparel => "Wearing apparel (14)",
            Sector::Wood => "Wood and wood products, except furniture (16)",
            Sector::Paper => "Paper and paper products (17)",
            Sector::Chemicals => "Chemicals and chemical products (20)",
            Sector::RubberPlastic => "Rubber and plastic products (22)",
            Sector::NonMetallicMinerals => "Other non-metallic mineral products (23)",
            Sector::BasicMetals => "Basic metals (24)",
            Sector::FabricatedMetal => {
                "Fabricated metal products, except machinery and equipment (25)"
            }
            Sector::ElectricalEquipment => "Electrical equipment (27)",
            Sector::MotorVehicles => "Motor vehicles, trailers and semi-trailers (29)",
            Sector::Furniture => "Furniture (31)",
            Sector::Mining => "Mining and quarrying (05 to 09)",
        }
    }

    /// Localized label shown to users.
    pub fn localized(self) -> &'static str {
        match self {
            Sector::FoodProducts => "Produk makanan (10)",
            Sector::Textiles => "Tekstil (13)",
            Sector::WearingApparel => "Pakaian jadi (14)",
            Sector::Wood => "Kayu dan produk kayu, kecuali furnitur (16)",
            Sector::Paper => "Kertas dan produk kertas (17)",
            Sector::Chemicals => "Bahan kimia dan produk kimia (20)",
            Sector::RubberPlastic => "Produk karet dan plastik (22)",
            Sector::NonMetallicMinerals => "Produk mineral bukan logam lainnya (23)",
            Sector::BasicMetals => "Logam dasar (24)",
            Sector::FabricatedMetal => {
                "Produk logam fabrikasi, kecuali mesin dan peralatannya (25)"
            }
            Sector::ElectricalEquipment => "Peralatan listrik (27)",
            Sector::MotorVehicles => "Kendaraan bermotor, trailer dan semi-trailer (29)",
            Sector::Furniture => "Furnitur (31)",
            Sector::Mining => "Pertambangan dan penggalian (05 s.d. 09)",
        }
    }

    /// Exact (case-sensitive) match against the raw labels.
    pub fn from_raw(raw: &str) -> Option<Sector> {
        Sector::ALL.into_iter().find(|s| s.raw_label() == raw)
    }
}

/// Translate a raw sector label. Unknown labels pass through unchanged.
pub fn display_sector(raw: &str) -> String {
    match Sector::from_raw(raw) {
        Some(sector) => sector.localized().to_string(),
        None => raw.to_string(),
    }
}
