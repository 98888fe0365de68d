use qrcode::{EcLevel, QrCode};

use crate::error::{Error, QrResult};

// Symbol
//------------------------------------------------------------------------------

/// The module matrix of an encoded QR symbol, before rasterization.
#[derive(Debug, Clone)]
pub struct Symbol {
    modules: Vec<bool>,
    width: usize,
    version: i16,
}

impl Symbol {
    /// Symbol width in modules, quiet zone excluded.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Chosen symbol version: 1..=40, negated for micro symbols.
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Whether the module at (row, column) is dark.
    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.width && c < self.width, "module out of bounds");
        self.modules[r * self.width + c]
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Encodes a payload into a QR symbol at error correction level H, picking the
/// smallest version that fits.
///
/// Level H tolerates ~30% symbol damage, which is what lets a centered logo
/// occlude part of the symbol without breaking decodability.
pub fn encode(payload: &str) -> QrResult<Symbol> {
    if payload.trim().is_empty() {
        return Err(Error::EmptyPayload);
    }

    let code =
        QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H).map_err(Error::Encoding)?;

    let width = code.width();
    let version = match code.version() {
        qrcode::Version::Normal(v) => v,
        qrcode::Version::Micro(v) => -v,
    };
    let modules = code.to_colors().iter().map(|&c| c == qrcode::Color::Dark).collect();

    Ok(Symbol { modules, width, version })
}
