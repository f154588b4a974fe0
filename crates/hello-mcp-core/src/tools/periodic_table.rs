//! Periodic table reference data
//!
//! Static table of all 118 elements, indexed by atomic number (position 1 is
//! at index 0).

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Lowest valid atomic number
pub const MIN_ATOMIC_NUMBER: i64 = 1;
/// Highest valid atomic number
pub const MAX_ATOMIC_NUMBER: i64 = 118;

/// One periodic table entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    /// Chinese name, the table's primary key
    pub name: &'static str,
    /// Pinyin reading of the Chinese name
    pub pronunciation: &'static str,
    pub english_name: &'static str,
    pub atomic_weight: f64,
    pub period: u8,
    pub group: &'static str,
}

impl Element {
    /// One-line description returned by the lookup tools
    pub fn describe(&self) -> String {
        format!(
            "Element: {} ({}, {}), atomic number: {}, symbol: {}, atomic weight: {:.3}, period: {}, group: {}",
            self.name,
            self.pronunciation,
            self.english_name,
            self.atomic_number,
            self.symbol,
            self.atomic_weight,
            self.period,
            self.group
        )
    }
}

#[allow(clippy::too_many_arguments)]
const fn element(
    atomic_number: u8,
    symbol: &'static str,
    name: &'static str,
    pronunciation: &'static str,
    english_name: &'static str,
    atomic_weight: f64,
    period: u8,
    group: &'static str,
) -> Element {
    Element {
        atomic_number,
        symbol,
        name,
        pronunciation,
        english_name,
        atomic_weight,
        period,
        group,
    }
}

pub static PERIODIC_TABLE: [Element; 118] = [
    // Period 1
    element(1, "H", "氢", "qīng", "Hydrogen", 1.008, 1, "IA"),
    element(2, "He", "氦", "hài", "Helium", 4.0026, 1, "0族"),
    // Period 2
    element(3, "Li", "锂", "lǐ", "Lithium", 6.941, 2, "IA"),
    element(4, "Be", "铍", "pí", "Beryllium", 9.0122, 2, "IIA"),
    element(5, "B", "硼", "péng", "Boron", 10.811, 2, "IIIA"),
    element(6, "C", "碳", "tàn", "Carbon", 12.011, 2, "IVA"),
    element(7, "N", "氮", "dàn", "Nitrogen", 14.007, 2, "VA"),
    element(8, "O", "氧", "yǎng", "Oxygen", 15.999, 2, "VIA"),
    element(9, "F", "氟", "fú", "Fluorine", 18.998, 2, "VIIA"),
    element(10, "Ne", "氖", "nǎi", "Neon", 20.180, 2, "0族"),
    // Period 3
    element(11, "Na", "钠", "nà", "Sodium", 22.990, 3, "IA"),
    element(12, "Mg", "镁", "měi", "Magnesium", 24.305, 3, "IIA"),
    element(13, "Al", "铝", "lǚ", "Aluminum", 26.982, 3, "IIIA"),
    element(14, "Si", "硅", "guī", "Silicon", 28.085, 3, "IVA"),
    element(15, "P", "磷", "lín", "Phosphorus", 30.974, 3, "VA"),
    element(16, "S", "硫", "liú", "Sulfur", 32.06, 3, "VIA"),
    element(17, "Cl", "氯", "lǜ", "Chlorine", 35.45, 3, "VIIA"),
    element(18, "Ar", "氩", "yà", "Argon", 39.948, 3, "0族"),
    // Period 4
    element(19, "K", "钾", "jiǎ", "Potassium", 39.098, 4, "IA"),
    element(20, "Ca", "钙", "gài", "Calcium", 40.078, 4, "IIA"),
    element(21, "Sc", "钪", "kàng", "Scandium", 44.956, 4, "IIIB"),
    element(22, "Ti", "钛", "tài", "Titanium", 47.867, 4, "IVB"),
    element(23, "V", "钒", "fán", "Vanadium", 50.942, 4, "VB"),
    element(24, "Cr", "铬", "gè", "Chromium", 51.996, 4, "VIB"),
    element(25, "Mn", "锰", "měng", "Manganese", 54.938, 4, "VIIB"),
    element(26, "Fe", "铁", "tiě", "Iron", 55.845, 4, "VIIIB"),
    element(27, "Co", "钴", "gǔ", "Cobalt", 58.933, 4, "VIIIB"),
    element(28, "Ni", "镍", "niè", "Nickel", 58.693, 4, "VIIIB"),
    element(29, "Cu", "铜", "tóng", "Copper", 63.546, 4, "IB"),
    element(30, "Zn", "锌", "xīn", "Zinc", 65.38, 4, "IIB"),
    element(31, "Ga", "镓", "jiā", "Gallium", 69.723, 4, "IIIA"),
    element(32, "Ge", "锗", "zhě", "Germanium", 72.63, 4, "IVA"),
    element(33, "As", "砷", "shēn", "Arsenic", 74.922, 4, "VA"),
    element(34, "Se", "硒", "xī", "Selenium", 78.971, 4, "VIA"),
    element(35, "Br", "溴", "xiù", "Bromine", 79.904, 4, "VIIA"),
    element(36, "Kr", "氪", "kè", "Krypton", 83.798, 4, "0族"),
    // Period 5
    element(37, "Rb", "铷", "rú", "Rubidium", 85.468, 5, "IA"),
    element(38, "Sr", "锶", "sī", "Strontium", 87.62, 5, "IIA"),
    element(39, "Y", "钇", "yǐ", "Yttrium", 88.906, 5, "IIIB"),
    element(40, "Zr", "锆", "gào", "Zirconium", 91.224, 5, "IVB"),
    element(41, "Nb", "铌", "ní", "Niobium", 92.906, 5, "VB"),
    element(42, "Mo", "钼", "mù", "Molybdenum", 95.95, 5, "VIB"),
    element(43, "Tc", "锝", "dé", "Technetium", 98.0, 5, "VIIB"),
    element(44, "Ru", "钌", "liǎo", "Ruthenium", 101.07, 5, "VIIIB"),
    element(45, "Rh", "铑", "láo", "Rhodium", 102.91, 5, "VIIIB"),
    element(46, "Pd", "钯", "bǎ", "Palladium", 106.42, 5, "VIIIB"),
    element(47, "Ag", "银", "yín", "Silver", 107.87, 5, "IB"),
    element(48, "Cd", "镉", "gé", "Cadmium", 112.41, 5, "IIB"),
    element(49, "In", "铟", "yīn", "Indium", 114.82, 5, "IIIA"),
    element(50, "Sn", "锡", "xī", "Tin", 118.71, 5, "IVA"),
    element(51, "Sb", "锑", "tī", "Antimony", 121.76, 5, "VA"),
    element(52, "Te", "碲", "dì", "Tellurium", 127.6, 5, "VIA"),
    element(53, "I", "碘", "diǎn", "Iodine", 126.9, 5, "VIIA"),
    element(54, "Xe", "氙", "xiān", "Xenon", 131.29, 5, "0族"),
    // Period 6
    element(55, "Cs", "铯", "sè", "Cesium", 132.91, 6, "IA"),
    element(56, "Ba", "钡", "bèi", "Barium", 137.33, 6, "IIA"),
    element(57, "La", "镧", "lán", "Lanthanum", 138.91, 6, "IIIB"),
    element(58, "Ce", "铈", "shì", "Cerium", 140.12, 6, "镧系"),
    element(59, "Pr", "镨", "pǔ", "Praseodymium", 140.91, 6, "镧系"),
    element(60, "Nd", "钕", "nǚ", "Neodymium", 144.24, 6, "镧系"),
    element(61, "Pm", "钷", "pǒ", "Promethium", 145.0, 6, "镧系"),
    element(62, "Sm", "钐", "shān", "Samarium", 150.36, 6, "镧系"),
    element(63, "Eu", "铕", "yǒu", "Europium", 151.96, 6, "镧系"),
    element(64, "Gd", "钆", "gá", "Gadolinium", 157.25, 6, "镧系"),
    element(65, "Tb", "铽", "tè", "Terbium", 158.93, 6, "镧系"),
    element(66, "Dy", "镝", "dī", "Dysprosium", 162.50, 6, "镧系"),
    element(67, "Ho", "钬", "huǒ", "Holmium", 164.93, 6, "镧系"),
    element(68, "Er", "铒", "ěr", "Erbium", 167.26, 6, "镧系"),
    element(69, "Tm", "铥", "diū", "Thulium", 168.93, 6, "镧系"),
    element(70, "Yb", "镱", "yì", "Ytterbium", 173.05, 6, "镧系"),
    element(71, "Lu", "镥", "lǔ", "Lutetium", 174.97, 6, "镧系"),
    element(72, "Hf", "铪", "hā", "Hafnium", 178.49, 6, "IVB"),
    element(73, "Ta", "钽", "tǎn", "Tantalum", 180.95, 6, "VB"),
    element(74, "W", "钨", "wū", "Tungsten", 183.84, 6, "VIB"),
    element(75, "Re", "铼", "lái", "Rhenium", 186.21, 6, "VIIB"),
    element(76, "Os", "锇", "é", "Osmium", 190.23, 6, "VIIIB"),
    element(77, "Ir", "铱", "yī", "Iridium", 192.22, 6, "VIIIB"),
    element(78, "Pt", "铂", "bó", "Platinum", 195.08, 6, "VIIIB"),
    element(79, "Au", "金", "jīn", "Gold", 196.97, 6, "IB"),
    element(80, "Hg", "汞", "gǒng", "Mercury", 200.59, 6, "IIB"),
    element(81, "Tl", "铊", "tā", "Thallium", 204.38, 6, "IIIA"),
    element(82, "Pb", "铅", "qiān", "Lead", 207.2, 6, "IVA"),
    element(83, "Bi", "铋", "bì", "Bismuth", 208.98, 6, "VA"),
    element(84, "Po", "钋", "pō", "Polonium", 209.0, 6, "VIA"),
    element(85, "At", "砹", "ài", "Astatine", 210.0, 6, "VIIA"),
    element(86, "Rn", "氡", "dōng", "Radon", 222.0, 6, "0族"),
    // Period 7
    element(87, "Fr", "钫", "fāng", "Francium", 223.0, 7, "IA"),
    element(88, "Ra", "镭", "léi", "Radium", 226.0, 7, "IIA"),
    element(89, "Ac", "锕", "ā", "Actinium", 227.0, 7, "IIIB"),
    element(90, "Th", "钍", "tǔ", "Thorium", 232.04, 7, "锕系"),
    element(91, "Pa", "镤", "pú", "Protactinium", 231.04, 7, "锕系"),
    element(92, "U", "铀", "yóu", "Uranium", 238.03, 7, "锕系"),
    element(93, "Np", "镎", "ná", "Neptunium", 237.0, 7, "锕系"),
    element(94, "Pu", "钚", "bù", "Plutonium", 244.0, 7, "锕系"),
    element(95, "Am", "镅", "méi", "Americium", 243.0, 7, "锕系"),
    element(96, "Cm", "锔", "jú", "Curium", 247.0, 7, "锕系"),
    element(97, "Bk", "锫", "péi", "Berkelium", 247.0, 7, "锕系"),
    element(98, "Cf", "锎", "kāi", "Californium", 251.0, 7, "锕系"),
    element(99, "Es", "锿", "āi", "Einsteinium", 252.0, 7, "锕系"),
    element(100, "Fm", "镄", "fèi", "Fermium", 257.0, 7, "锕系"),
    element(101, "Md", "钔", "mén", "Mendelevium", 258.0, 7, "锕系"),
    element(102, "No", "锘", "nuò", "Nobelium", 259.0, 7, "锕系"),
    element(103, "Lr", "铹", "láo", "Lawrencium", 262.0, 7, "锕系"),
    element(104, "Rf", "𬬻", "lú", "Rutherfordium", 267.0, 7, "IVB"),
    element(105, "Db", "𬭊", "dù", "Dubnium", 268.0, 7, "VB"),
    element(106, "Sg", "𬭳", "xǐ", "Seaborgium", 271.0, 7, "VIB"),
    element(107, "Bh", "𬭛", "bō", "Bohrium", 272.0, 7, "VIIB"),
    element(108, "Hs", "𬭶", "hēi", "Hassium", 270.0, 7, "VIIIB"),
    element(109, "Mt", "鿏", "mài", "Meitnerium", 276.0, 7, "VIIIB"),
    element(110, "Ds", "𫟼", "dá", "Darmstadtium", 281.0, 7, "VIIIB"),
    element(111, "Rg", "𬬭", "lún", "Roentgenium", 280.0, 7, "IB"),
    element(112, "Cn", "鿔", "gē", "Copernicium", 285.0, 7, "IIB"),
    element(113, "Nh", "鿭", "nǐ", "Nihonium", 284.0, 7, "IIIA"),
    element(114, "Fl", "𫓧", "fū", "Flerovium", 289.0, 7, "IVA"),
    element(115, "Mc", "镆", "mò", "Moscovium", 288.0, 7, "VA"),
    element(116, "Lv", "𫟷", "lì", "Livermorium", 293.0, 7, "VIA"),
    element(117, "Ts", "鿬", "tián", "Tennessine", 294.0, 7, "VIIA"),
    element(118, "Og", "鿫", "ào", "Oganesson", 294.0, 7, "0族"),
];

static BY_NAME: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    PERIODIC_TABLE
        .iter()
        .enumerate()
        .map(|(i, e)| (e.name, i))
        .collect()
});

/// Find an element by atomic number
pub fn by_atomic_number(position: i64) -> Option<&'static Element> {
    if !(MIN_ATOMIC_NUMBER..=MAX_ATOMIC_NUMBER).contains(&position) {
        return None;
    }
    PERIODIC_TABLE.get((position - 1) as usize)
}

/// Find an element by Chinese name, English name (any case) or symbol
pub fn find(key: &str) -> Option<&'static Element> {
    if let Some(&i) = BY_NAME.get(key) {
        return Some(&PERIODIC_TABLE[i]);
    }
    PERIODIC_TABLE
        .iter()
        .find(|e| e.english_name.eq_ignore_ascii_case(key))
        .or_else(|| PERIODIC_TABLE.iter().find(|e| e.symbol == key))
}
