//! # 元素周期表
//!
//! 元素符号与原子序数之间的转换。XSF 格式以原子序数标识原子，
//! 而 POSCAR 等格式使用元素符号。
//!
//! ## 依赖关系
//! - 被 `models/structure.rs`, `parsers/poscar.rs` 使用

/// 元素符号，按原子序数排列（下标 0 对应 Z = 1）
const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// 根据元素符号获取原子序数
///
/// 接受 VASP 风格的赝势后缀，如 `Fe_pv`、`O/1a2b3c`。
pub fn atomic_number(symbol: &str) -> Option<u32> {
    let bare: String = symbol
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    SYMBOLS
        .iter()
        .position(|&s| s.eq_ignore_ascii_case(&bare))
        .map(|i| i as u32 + 1)
}

/// 根据原子序数获取元素符号
pub fn symbol(z: u32) -> Option<&'static str> {
    if z == 0 {
        return None;
    }
    SYMBOLS.get(z as usize - 1).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_number_lookup() {
        assert_eq!(atomic_number("H"), Some(1));
        assert_eq!(atomic_number("Al"), Some(13));
        assert_eq!(atomic_number("Fe_pv"), Some(26));
        assert_eq!(atomic_number("O/1a2b"), Some(8));
        assert_eq!(atomic_number("Og"), Some(118));
        assert_eq!(atomic_number("Xx"), None);
    }

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(symbol(13), Some("Al"));
        assert_eq!(symbol(0), None);
        assert_eq!(symbol(119), None);
    }
}
