//! Static promotional offer catalog.
//!
//! Exactly three offers exist; they are configuration data, never created at
//! runtime. Which one a session ends on is decided solely by the two gate
//! answers.

/// Identifies one of the three terminal offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferKind {
    Superbet,
    Fortuna,
    Generic,
}

/// A static promotional record bound to the session at the terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offer {
    pub name: &'static str,
    pub description: &'static str,
    pub cta_text: &'static str,
    pub link: &'static str,
    pub logo: &'static str,
}

const SUPERBET: Offer = Offer {
    name: "Superbet",
    description: "Odbierz bonus powitalny na start!",
    cta_text: "Odbierz bonus Superbet",
    link: "https://example.com/partner-superbet",
    logo: "images/super-bet.svg",
};

const FORTUNA: Offer = Offer {
    name: "Fortuna",
    description: "Graj bez ryzyka do 600 PLN i zyskaj 20 PLN na start!",
    cta_text: "Zarejestruj się w Fortunie",
    link: "https://online.efortuna.pl/page?key=ej0xNTc1Mzg3MyZsPTE1OTUyMDkxJnA9MTAwMTA3",
    logo: "images/fortuna.png",
};

const GENERIC: Offer = Offer {
    name: "Inne Bonusy",
    description: "Sprawdź najlepsze oferty u innych legalnych bukmacherów!",
    cta_text: "Sprawdź listę bonusów",
    link: "https://example.com/all-bonuses",
    logo: "images/logo.png",
};

/// First qualification question, tied to the Superbet offer
pub const GATE_ONE_QUESTION: &str = "Czy masz konto w Superbecie? Odbierz bonus!";

/// Second qualification question, tied to the Fortuna offer
pub const GATE_TWO_QUESTION: &str = "Czy masz konto w Fortunie? Odbierz bonus!";

impl OfferKind {
    /// Resolves the static offer record for this kind.
    pub fn offer(self) -> &'static Offer {
        match self {
            OfferKind::Superbet => &SUPERBET,
            OfferKind::Fortuna => &FORTUNA,
            OfferKind::Generic => &GENERIC,
        }
    }
}
