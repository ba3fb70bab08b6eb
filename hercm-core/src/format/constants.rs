//! Format literals and limits for HeRCM files

/// Leading tag of the CSR variant (two tokens)
pub const HERCM_FILE_TAG: &str = "HERCM FILE";

/// Leading tag of the COO variant
pub const HERCM_TAG: &str = "HERCM";

/// Leading tag written by the BXF tooling for the COO variant
pub const BXF_TAG: &str = "BXF";

/// Header token count of the CSR variant
pub const CSR_HEADER_TOKENS: usize = 7;

/// Header token count of the COO variant
pub const COO_HEADER_TOKENS: usize = 6;

/// Maximum number of lines scanned while waiting for a field marker
pub const MAX_UNMARKED_LINES: usize = 10_000;

/// Values per line written by the BXF tooling
pub const BXF_VALUES_PER_LINE: usize = 9;

/// Symmetry literals
pub mod symmetry {
    /// Only one triangle of a symmetric matrix is stored
    pub const SYM: &str = "SYM";

    /// Every nonzero entry is stored
    pub const ASYM: &str = "ASYM";
}

/// Body marker literals
pub mod markers {
    pub const VAL: &str = "VAL";
    pub const ROWPTR: &str = "ROWPTR";
    pub const COLIND: &str = "COLIND";
    pub const ROW: &str = "ROW";
    pub const COL: &str = "COL";
    pub const REMARKS: &str = "REMARKS";
    pub const ENDFIELD: &str = "ENDFIELD";
    pub const END: &str = "END";
}

/// Descriptor tokens the BXF tooling appends to COO markers
pub mod descriptors {
    pub const FLOAT_LIST: &str = "LIST FLOAT";
    pub const INT_LIST: &str = "LIST INT";
    pub const STRING_LIST: &str = "LIST STRING";
}
