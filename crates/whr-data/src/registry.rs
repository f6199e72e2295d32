//! Country name registry
//!
//! Resolves the many spellings used by the happiness report and by boundary
//! files ("Turkiye", "Congo (Kinshasa)", "Dem. Rep. Congo") to ISO alpha-3
//! codes. Lookups go through [`normalize_name`], so case, punctuation,
//! whitespace and common diacritics do not matter.

use std::sync::OnceLock;

use ahash::AHashMap;

/// ISO alpha-3 code followed by every known spelling
const COUNTRIES: &[(&str, &[&str])] = &[
    ("AFG", &["Afghanistan"]),
    ("ALB", &["Albania"]),
    ("DZA", &["Algeria"]),
    ("AGO", &["Angola"]),
    ("ARG", &["Argentina"]),
    ("ARM", &["Armenia"]),
    ("AUS", &["Australia"]),
    ("AUT", &["Austria"]),
    ("AZE", &["Azerbaijan"]),
    ("BHS", &["Bahamas", "The Bahamas"]),
    ("BHR", &["Bahrain"]),
    ("BGD", &["Bangladesh"]),
    ("BLR", &["Belarus"]),
    ("BEL", &["Belgium"]),
    ("BLZ", &["Belize"]),
    ("BEN", &["Benin"]),
    ("BTN", &["Bhutan"]),
    ("BOL", &["Bolivia", "Bolivia, Plurinational State of"]),
    ("BIH", &["Bosnia and Herzegovina", "Bosnia and Herz."]),
    ("BWA", &["Botswana"]),
    ("BRA", &["Brazil"]),
    ("BRN", &["Brunei", "Brunei Darussalam"]),
    ("BGR", &["Bulgaria"]),
    ("BFA", &["Burkina Faso"]),
    ("BDI", &["Burundi"]),
    ("KHM", &["Cambodia"]),
    ("CMR", &["Cameroon"]),
    ("CAN", &["Canada"]),
    ("CAF", &["Central African Republic", "Central African Rep."]),
    ("TCD", &["Chad"]),
    ("CHL", &["Chile"]),
    ("CHN", &["China"]),
    ("COL", &["Colombia"]),
    ("COM", &["Comoros"]),
    ("COG", &["Congo (Brazzaville)", "Congo", "Republic of the Congo"]),
    ("COD", &["Congo (Kinshasa)", "Dem. Rep. Congo", "Democratic Republic of the Congo", "Congo, The Democratic Republic of the"]),
    ("CRI", &["Costa Rica"]),
    ("CIV", &["Ivory Coast", "Côte d'Ivoire", "Cote d'Ivoire"]),
    ("HRV", &["Croatia"]),
    ("CUB", &["Cuba"]),
    ("CYP", &["Cyprus"]),
    ("CZE", &["Czechia", "Czech Republic"]),
    ("DNK", &["Denmark"]),
    ("DJI", &["Djibouti"]),
    ("DOM", &["Dominican Republic", "Dominican Rep."]),
    ("ECU", &["Ecuador"]),
    ("EGY", &["Egypt"]),
    ("SLV", &["El Salvador"]),
    ("GNQ", &["Equatorial Guinea", "Eq. Guinea"]),
    ("ERI", &["Eritrea"]),
    ("EST", &["Estonia"]),
    ("SWZ", &["Eswatini", "eSwatini", "Swaziland"]),
    ("ETH", &["Ethiopia"]),
    ("FJI", &["Fiji"]),
    ("FIN", &["Finland"]),
    ("FRA", &["France"]),
    ("GAB", &["Gabon"]),
    ("GMB", &["Gambia", "The Gambia"]),
    ("GEO", &["Georgia"]),
    ("DEU", &["Germany"]),
    ("GHA", &["Ghana"]),
    ("GRC", &["Greece"]),
    ("GRL", &["Greenland"]),
    ("GTM", &["Guatemala"]),
    ("GIN", &["Guinea"]),
    ("GNB", &["Guinea-Bissau", "Guinea Bissau"]),
    ("GUY", &["Guyana"]),
    ("HTI", &["Haiti"]),
    ("HND", &["Honduras"]),
    ("HKG", &["Hong Kong S.A.R. of China", "Hong Kong"]),
    ("HUN", &["Hungary"]),
    ("ISL", &["Iceland"]),
    ("IND", &["India"]),
    ("IDN", &["Indonesia"]),
    ("IRN", &["Iran", "Iran, Islamic Republic of"]),
    ("IRQ", &["Iraq"]),
    ("IRL", &["Ireland"]),
    ("ISR", &["Israel"]),
    ("ITA", &["Italy"]),
    ("JAM", &["Jamaica"]),
    ("JPN", &["Japan"]),
    ("JOR", &["Jordan"]),
    ("KAZ", &["Kazakhstan"]),
    ("KEN", &["Kenya"]),
    ("XKX", &["Kosovo"]),
    ("KWT", &["Kuwait"]),
    ("KGZ", &["Kyrgyzstan"]),
    ("LAO", &["Laos", "Lao PDR", "Lao People's Democratic Republic"]),
    ("LVA", &["Latvia"]),
    ("LBN", &["Lebanon"]),
    ("LSO", &["Lesotho"]),
    ("LBR", &["Liberia"]),
    ("LBY", &["Libya"]),
    ("LTU", &["Lithuania"]),
    ("LUX", &["Luxembourg"]),
    ("MDG", &["Madagascar"]),
    ("MWI", &["Malawi"]),
    ("MYS", &["Malaysia"]),
    ("MDV", &["Maldives"]),
    ("MLI", &["Mali"]),
    ("MLT", &["Malta"]),
    ("MRT", &["Mauritania"]),
    ("MUS", &["Mauritius"]),
    ("MEX", &["Mexico"]),
    ("MDA", &["Moldova", "Moldova, Republic of"]),
    ("MNG", &["Mongolia"]),
    ("MNE", &["Montenegro"]),
    ("MAR", &["Morocco"]),
    ("MOZ", &["Mozambique"]),
    ("MMR", &["Myanmar"]),
    ("NAM", &["Namibia"]),
    ("NPL", &["Nepal"]),
    ("NLD", &["Netherlands"]),
    ("NZL", &["New Zealand"]),
    ("NIC", &["Nicaragua"]),
    ("NER", &["Niger"]),
    ("NGA", &["Nigeria"]),
    ("PRK", &["North Korea", "Korea, Democratic People's Republic of"]),
    ("MKD", &["North Macedonia", "Macedonia"]),
    ("NOR", &["Norway"]),
    ("OMN", &["Oman"]),
    ("PAK", &["Pakistan"]),
    ("PSE", &["State of Palestine", "Palestine", "Palestinian Territories", "Palestine, State of"]),
    ("PAN", &["Panama"]),
    ("PNG", &["Papua New Guinea"]),
    ("PRY", &["Paraguay"]),
    ("PER", &["Peru"]),
    ("PHL", &["Philippines"]),
    ("POL", &["Poland"]),
    ("PRT", &["Portugal"]),
    ("PRI", &["Puerto Rico"]),
    ("QAT", &["Qatar"]),
    ("ROU", &["Romania"]),
    ("RUS", &["Russia", "Russian Federation"]),
    ("RWA", &["Rwanda"]),
    ("SAU", &["Saudi Arabia"]),
    ("SEN", &["Senegal"]),
    ("SRB", &["Serbia"]),
    ("SLE", &["Sierra Leone"]),
    ("SGP", &["Singapore"]),
    ("SVK", &["Slovakia"]),
    ("SVN", &["Slovenia"]),
    ("SLB", &["Solomon Islands", "Solomon Is."]),
    ("SOM", &["Somalia"]),
    ("ZAF", &["South Africa"]),
    ("KOR", &["South Korea", "Korea, Republic of", "Korea"]),
    ("SSD", &["South Sudan", "S. Sudan"]),
    ("ESP", &["Spain"]),
    ("LKA", &["Sri Lanka"]),
    ("SDN", &["Sudan"]),
    ("SUR", &["Suriname"]),
    ("SWE", &["Sweden"]),
    ("CHE", &["Switzerland"]),
    ("SYR", &["Syria", "Syrian Arab Republic"]),
    ("TWN", &["Taiwan Province of China", "Taiwan"]),
    ("TJK", &["Tajikistan"]),
    ("TZA", &["Tanzania", "Tanzania, United Republic of"]),
    ("THA", &["Thailand"]),
    ("TLS", &["Timor-Leste", "East Timor"]),
    ("TGO", &["Togo"]),
    ("TTO", &["Trinidad and Tobago"]),
    ("TUN", &["Tunisia"]),
    ("TUR", &["Turkiye", "Türkiye", "Turkey"]),
    ("TKM", &["Turkmenistan"]),
    ("UGA", &["Uganda"]),
    ("UKR", &["Ukraine"]),
    ("ARE", &["United Arab Emirates"]),
    ("GBR", &["United Kingdom"]),
    ("USA", &["United States", "United States of America"]),
    ("URY", &["Uruguay"]),
    ("UZB", &["Uzbekistan"]),
    ("VUT", &["Vanuatu"]),
    ("VEN", &["Venezuela", "Venezuela, Bolivarian Republic of"]),
    ("VNM", &["Vietnam", "Viet Nam"]),
    ("ESH", &["Western Sahara", "W. Sahara"]),
    ("YEM", &["Yemen"]),
    ("ZMB", &["Zambia"]),
    ("ZWE", &["Zimbabwe"]),
];

fn lookup_table() -> &'static AHashMap<String, &'static str> {
    static TABLE: OnceLock<AHashMap<String, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = AHashMap::new();
        for (code, names) in COUNTRIES {
            table.insert(normalize_name(code), *code);
            for name in names.iter() {
                table.insert(normalize_name(name), *code);
            }
        }
        table
    })
}

/// Fold a country name to a comparison key
///
/// Lowercases, folds common Latin diacritics, spells out `&` and drops every
/// character that is not a letter or digit.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        let folded = match ch {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'a',
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'o',
            'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
            'ç' | 'Ç' => 'c',
            'ñ' | 'Ñ' => 'n',
            '&' => {
                out.push_str("and");
                continue;
            }
            other => other,
        };
        if folded.is_alphanumeric() {
            out.extend(folded.to_lowercase());
        }
    }
    out
}

/// Resolve a country name or code to its ISO alpha-3 code
pub fn resolve_code(name: &str) -> Option<&'static str> {
    let key = normalize_name(name);
    if key.is_empty() {
        return None;
    }
    lookup_table().get(&key).copied()
}
