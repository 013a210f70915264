//! The closed set of reporting categories and their default wiring

use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://training-bios2.kemenkeu.go.id/api";

/// One financial or staffing reporting domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Penerimaan,
    Pengeluaran,
    SaldoOperasional,
    SaldoPengelolaanKas,
    SaldoDanaKelolaan,
    JumlahDosen,
    JumlahTendik,
}

impl Category {
    /// Fixed processing order
    pub const ALL: [Category; 7] = [
        Category::Penerimaan,
        Category::Pengeluaran,
        Category::SaldoOperasional,
        Category::SaldoPengelolaanKas,
        Category::SaldoDanaKelolaan,
        Category::JumlahDosen,
        Category::JumlahTendik,
    ];

    /// Stable key used in config files and logs
    pub fn key(&self) -> &'static str {
        match self {
            Category::Penerimaan => "penerimaan",
            Category::Pengeluaran => "pengeluaran",
            Category::SaldoOperasional => "saldo_operasional",
            Category::SaldoPengelolaanKas => "saldo_pengelolaan_kas",
            Category::SaldoDanaKelolaan => "saldo_dana_kelolaan",
            Category::JumlahDosen => "jumlah_dosen",
            Category::JumlahTendik => "jumlah_tendik",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// Human heading used in the rendered report
    pub fn label(&self) -> &'static str {
        match self {
            Category::Penerimaan => "Penerimaan",
            Category::Pengeluaran => "Pengeluaran",
            Category::SaldoOperasional => "Saldo Operasional",
            Category::SaldoPengelolaanKas => "Saldo Pengelolaan Kas",
            Category::SaldoDanaKelolaan => "Saldo Dana Kelolaan",
            Category::JumlahDosen => "Jumlah Dosen",
            Category::JumlahTendik => "Jumlah Tendik",
        }
    }

    fn endpoint_path(&self) -> &'static str {
        match self {
            Category::Penerimaan => "keuangan/akuntansi/penerimaan",
            Category::Pengeluaran => "keuangan/akuntansi/pengeluaran",
            Category::SaldoOperasional => "keuangan/saldo/saldo_operasional",
            Category::SaldoPengelolaanKas => "keuangan/saldo/saldo_pengelolaan_kas",
            Category::SaldoDanaKelolaan => "keuangan/saldo/saldo_dana_kelolaan",
            Category::JumlahDosen => "pendidikan/sdm/jumlah_tenaga_pendidik_ptn",
            Category::JumlahTendik => "pendidikan/sdm/jumlah_tenaga_kependidikan",
        }
    }

    fn default_sheet_id(&self) -> &'static str {
        match self {
            Category::Penerimaan => "1ayQ5Y2-NwlCBYFZjsEFJvi67zbubmUdqMtOeDfC-E7U",
            Category::Pengeluaran => "1H0aR41ZGtFE1WSCyObTqbUDzsB6NKAg--PUw0577fK8",
            Category::SaldoOperasional => "1_lm0MA9F68SEIXA8s4XfsGVWiF-Cja3EymEd4ou4PlE",
            Category::SaldoPengelolaanKas => "1IItvpcxH14GLCO1tIGVz0plA8dHe5vqd0_Z4jMxNV80",
            Category::SaldoDanaKelolaan => "1BHSukPx8K-PljTnhxxkfoGAp4RQmZbrhiv66hyGzp_g",
            Category::JumlahDosen => "11wNwBoBClTfjtooUs8Ngx0qWdu1IRVfwB4beiyEXb7Q",
            Category::JumlahTendik => "1ljT3L7eZjgI8LFnC6C_KpK2_QRSYRxhFCfPEsofnqkI",
        }
    }

    /// Default wiring for the training BIOS deployment
    pub fn default_config(&self) -> CategoryConfig {
        CategoryConfig {
            category: *self,
            sheet_id: self.default_sheet_id().to_string(),
            endpoint: format!("{}/ws/{}", API_BASE, self.endpoint_path()),
            read_endpoint: Some(format!("{}/get/{}", API_BASE, self.endpoint_path())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Wiring of one category: source spreadsheet, delivery endpoint, and the
/// optional read-back endpoint used by report generation
#[derive(Debug, Clone)]
pub struct CategoryConfig {
    pub category: Category,
    pub sheet_id: String,
    pub endpoint: String,
    pub read_endpoint: Option<String>,
}
