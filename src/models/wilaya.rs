//! Algerian wilaya reference table
//!
//! TAP rows reference a wilaya by its two-digit code. The table is
//! presentation data: unknown codes are still accepted on save.

/// A wilaya with a short list of its communes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wilaya {
    pub code: &'static str,
    pub name: &'static str,
    pub communes: &'static [&'static str],
}

impl Wilaya {
    pub fn has_commune(&self, commune: &str) -> bool {
        let commune = commune.trim();
        self.communes.iter().any(|c| c.eq_ignore_ascii_case(commune))
    }
}

pub const WILAYAS: [Wilaya; 58] = [
    Wilaya {
        code: "01",
        name: "Adrar",
        communes: &["Adrar", "Reggane", "Timimoun"],
    },
    Wilaya {
        code: "02",
        name: "Chlef",
        communes: &["Chlef", "Ténès", "Boukadir"],
    },
    Wilaya {
        code: "03",
        name: "Laghouat",
        communes: &["Laghouat", "Aflou", "Hassi R'Mel"],
    },
    Wilaya {
        code: "04",
        name: "Oum El Bouaghi",
        communes: &["Oum El Bouaghi", "Aïn Beïda", "Aïn M'lila"],
    },
    Wilaya {
        code: "05",
        name: "Batna",
        communes: &["Batna", "Barika", "Arris"],
    },
    Wilaya {
        code: "06",
        name: "Béjaïa",
        communes: &["Béjaïa", "Akbou", "Souk El Tenine"],
    },
    Wilaya {
        code: "07",
        name: "Biskra",
        communes: &["Biskra", "Tolga", "Ouled Djellal"],
    },
    Wilaya {
        code: "08",
        name: "Béchar",
        communes: &["Béchar", "Abadla", "Kenadsa"],
    },
    Wilaya {
        code: "09",
        name: "Blida",
        communes: &["Blida", "Boufarik", "Larbaa"],
    },
    Wilaya {
        code: "10",
        name: "Bouira",
        communes: &["Bouira", "Lakhdaria", "Sour El Ghozlane"],
    },
    Wilaya {
        code: "11",
        name: "Tamanrasset",
        communes: &["Tamanrasset", "In Salah", "In Guezzam"],
    },
    Wilaya {
        code: "12",
        name: "Tébessa",
        communes: &["Tébessa", "Bir El Ater", "Cheria"],
    },
    Wilaya {
        code: "13",
        name: "Tlemcen",
        communes: &["Tlemcen", "Maghnia", "Ghazaouet"],
    },
    Wilaya {
        code: "14",
        name: "Tiaret",
        communes: &["Tiaret", "Frenda", "Ksar Chellala"],
    },
    Wilaya {
        code: "15",
        name: "Tizi Ouzou",
        communes: &["Tizi Ouzou", "Azazga", "Tigzirt"],
    },
    Wilaya {
        code: "16",
        name: "Alger",
        communes: &["Alger Centre", "Bab El Oued", "Hussein Dey", "El Harrach", "Kouba"],
    },
    Wilaya {
        code: "17",
        name: "Djelfa",
        communes: &["Djelfa", "Messaad", "Ain Oussera"],
    },
    Wilaya {
        code: "18",
        name: "Jijel",
        communes: &["Jijel", "El Milia", "Taher"],
    },
    Wilaya {
        code: "19",
        name: "Sétif",
        communes: &["Sétif", "El Eulma", "Aïn Azel"],
    },
    Wilaya {
        code: "20",
        name: "Saïda",
        communes: &["Saïda", "Aïn El Hadjar", "Ouled Brahim"],
    },
    Wilaya {
        code: "21",
        name: "Skikda",
        communes: &["Skikda", "Collo", "El Harrouch"],
    },
    Wilaya {
        code: "22",
        name: "Sidi Bel Abbès",
        communes: &["Sidi Bel Abbès", "Mascara", "Telagh"],
    },
    Wilaya {
        code: "23",
        name: "Annaba",
        communes: &["Annaba", "El Hadjar", "Berrahal"],
    },
    Wilaya {
        code: "24",
        name: "Guelma",
        communes: &["Guelma", "Bouchegouf", "Heliopolis"],
    },
    Wilaya {
        code: "25",
        name: "Constantine",
        communes: &["Constantine", "El Khroub", "Aïn Smara"],
    },
    Wilaya {
        code: "26",
        name: "Médéa",
        communes: &["Médéa", "Berrouaghia", "Ksar El Boukhari"],
    },
    Wilaya {
        code: "27",
        name: "Mostaganem",
        communes: &["Mostaganem", "Aïn Tedles", "Sidi Ali"],
    },
    Wilaya {
        code: "28",
        name: "M'Sila",
        communes: &["M'Sila", "Boussaâda", "Sidi Aïssa"],
    },
    Wilaya {
        code: "29",
        name: "Mascara",
        communes: &["Mascara", "Sig", "Tighennif"],
    },
    Wilaya {
        code: "30",
        name: "Ouargla",
        communes: &["Ouargla", "Hassi Messaoud", "Touggourt"],
    },
    Wilaya {
        code: "31",
        name: "Oran",
        communes: &["Oran", "Es Sénia", "Bir El Djir", "Aïn Turk"],
    },
    Wilaya {
        code: "32",
        name: "El Bayadh",
        communes: &["El Bayadh", "Brezina", "Rogassa"],
    },
    Wilaya {
        code: "33",
        name: "Illizi",
        communes: &["Illizi", "Djanet", "In Amenas"],
    },
    Wilaya {
        code: "34",
        name: "Bordj Bou Arreridj",
        communes: &["Bordj Bou Arreridj", "Ras El Oued", "Bir Kasdali"],
    },
    Wilaya {
        code: "35",
        name: "Boumerdès",
        communes: &["Boumerdès", "Dellys", "Khemis El Khechna"],
    },
    Wilaya {
        code: "36",
        name: "El Tarf",
        communes: &["El Tarf", "Ben Mehidi", "Besbes"],
    },
    Wilaya {
        code: "37",
        name: "Tindouf",
        communes: &["Tindouf"],
    },
    Wilaya {
        code: "38",
        name: "Tissemsilt",
        communes: &["Tissemsilt", "Bordj Bounaama", "Theniet El Had"],
    },
    Wilaya {
        code: "39",
        name: "El Oued",
        communes: &["El Oued", "Guemar", "Bayadha"],
    },
    Wilaya {
        code: "40",
        name: "Khenchela",
        communes: &["Khenchela", "Aïn Touila", "Baghaï"],
    },
    Wilaya {
        code: "41",
        name: "Souk Ahras",
        communes: &["Souk Ahras", "Sedrata", "Taoura"],
    },
    Wilaya {
        code: "42",
        name: "Tipaza",
        communes: &["Tipaza", "Cherchell", "Koléa"],
    },
    Wilaya {
        code: "43",
        name: "Mila",
        communes: &["Mila", "Chelghoum Laïd", "Ferdjioua"],
    },
    Wilaya {
        code: "44",
        name: "Aïn Defla",
        communes: &["Aïn Defla", "Khemis Miliana", "El Abadia"],
    },
    Wilaya {
        code: "45",
        name: "Naâma",
        communes: &["Naâma", "Méchéria", "Aïn Sefra"],
    },
    Wilaya {
        code: "46",
        name: "Aïn Témouchent",
        communes: &["Aïn Témouchent", "Beni Saf", "Hammam Bouhadjar"],
    },
    Wilaya {
        code: "47",
        name: "Ghardaïa",
        communes: &["Ghardaïa", "Guerrara", "El Meniaa"],
    },
    Wilaya {
        code: "48",
        name: "Relizane",
        communes: &["Relizane", "Mazouna", "Oued Rhiou"],
    },
    Wilaya {
        code: "49",
        name: "Timimoun",
        communes: &["Timimoun", "Charouine"],
    },
    Wilaya {
        code: "50",
        name: "Bordj Badji Mokhtar",
        communes: &["Bordj Badji Mokhtar"],
    },
    Wilaya {
        code: "51",
        name: "Ouled Djellal",
        communes: &["Ouled Djellal", "Sidi Khaled"],
    },
    Wilaya {
        code: "52",
        name: "Béni Abbès",
        communes: &["Béni Abbès"],
    },
    Wilaya {
        code: "53",
        name: "In Salah",
        communes: &["In Salah", "In Ghar"],
    },
    Wilaya {
        code: "54",
        name: "In Guezzam",
        communes: &["In Guezzam", "Tin Zaouatine"],
    },
    Wilaya {
        code: "55",
        name: "Touggourt",
        communes: &["Touggourt", "Nezla"],
    },
    Wilaya {
        code: "56",
        name: "Djanet",
        communes: &["Djanet"],
    },
    Wilaya {
        code: "57",
        name: "El M'Ghair",
        communes: &["El M'Ghair", "Djamaa"],
    },
    Wilaya {
        code: "58",
        name: "El Meniaa",
        communes: &["El Meniaa"],
    },
];

/// Look up a wilaya by code; `"1"` and `"01"` both find Adrar
pub fn find_wilaya(code: &str) -> Option<&'static Wilaya> {
    let code = code.trim();
    let normalized = match code.parse::<u8>() {
        Ok(n) => format!("{:02}", n),
        Err(_) => return None,
    };
    WILAYAS.iter().find(|w| w.code == normalized)
}

/// Display name for a code, or an empty string when unknown
pub fn wilaya_name(code: &str) -> &'static str {
    find_wilaya(code).map(|w| w.name).unwrap_or("")
}
