//! Code-Generator – Kurze, teilbare Raum-Codes
//!
//! Ein Code besteht aus Grossbuchstaben und Ziffern. Bei einer Kollision
//! mit einem aktiven Raum wird neu gezogen, bis der Code frei ist.

use nunuk_core::types::RoomCode;
use rand::Rng;

/// Zeichenvorrat fuer Raum-Codes
pub const CODE_ZEICHEN: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Standardlaenge eines Raum-Codes
pub const STANDARD_CODE_LAENGE: usize = 6;

/// Quelle fuer Code-Kandidaten
///
/// Die Eindeutigkeit prueft der `CodeGenerator`, nicht die Quelle.
pub trait CodeQuelle: Send {
    /// Zieht den naechsten Kandidaten
    fn ziehen(&mut self) -> RoomCode;
}

/// Zufaellige Codes aus `CODE_ZEICHEN`
#[derive(Debug, Clone)]
pub struct ZufallsCodes {
    laenge: usize,
}

impl ZufallsCodes {
    pub fn neu(laenge: usize) -> Self {
        Self {
            laenge: laenge.max(1),
        }
    }
}

impl Default for ZufallsCodes {
    fn default() -> Self {
        Self::neu(STANDARD_CODE_LAENGE)
    }
}

impl CodeQuelle for ZufallsCodes {
    fn ziehen(&mut self) -> RoomCode {
        let mut rng = rand::thread_rng();
        let code: String = (0..self.laenge)
            .map(|_| CODE_ZEICHEN[rng.gen_range(0..CODE_ZEICHEN.len())] as char)
            .collect();
        RoomCode(code)
    }
}

/// Erzeugt Codes die unter den aktiven Raeumen eindeutig sind
pub struct CodeGenerator {
    quelle: Box<dyn CodeQuelle>,
}

impl CodeGenerator {
    pub fn neu(quelle: Box<dyn CodeQuelle>) -> Self {
        Self { quelle }
    }

    /// Zieht so lange neu bis `belegt` den Kandidaten nicht mehr kennt
    pub fn generieren(&mut self, belegt: impl Fn(&RoomCode) -> bool) -> RoomCode {
        loop {
            let kandidat = self.quelle.ziehen();
            if !belegt(&kandidat) {
                return kandidat;
            }
            tracing::debug!(nunuk = %kandidat, "Code-Kollision, ziehe neu");
        }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::neu(Box::new(ZufallsCodes::default()))
    }
}

/// Vorgegebene Code-Folge fuer Tests
#[cfg(test)]
pub(crate) struct FesteCodes(std::collections::VecDeque<RoomCode>);

#[cfg(test)]
impl FesteCodes {
    pub(crate) fn neu<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        Self(codes.into_iter().map(RoomCode::from).collect())
    }
}

#[cfg(test)]
impl CodeQuelle for FesteCodes {
    fn ziehen(&mut self) -> RoomCode {
        self.0.pop_front().expect("Test-Codes aufgebraucht")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn zufallscode_format() {
        let mut quelle = ZufallsCodes::default();
        for _ in 0..200 {
            let code = quelle.ziehen();
            assert_eq!(code.as_str().len(), STANDARD_CODE_LAENGE);
            assert!(code
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn kollision_fuehrt_zu_neuziehung() {
        let mut generator = CodeGenerator::neu(Box::new(FesteCodes::neu(["AAAAAA", "AAAAAA", "BBBBBB"])));
        let belegt: HashSet<RoomCode> = [RoomCode::from("AAAAAA")].into_iter().collect();

        let code = generator.generieren(|c| belegt.contains(c));
        assert_eq!(code.as_str(), "BBBBBB");
    }

    #[test]
    fn freier_code_wird_sofort_genommen() {
        let mut generator = CodeGenerator::neu(Box::new(FesteCodes::neu(["AB12CD"])));
        assert_eq!(generator.generieren(|_| false).as_str(), "AB12CD");
    }

    #[test]
    fn laenge_mindestens_eins() {
        let mut quelle = ZufallsCodes::neu(0);
        assert_eq!(quelle.ziehen().as_str().len(), 1);
    }
}
