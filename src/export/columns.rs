//! Column names shared by the CSV and Parquet exports

/// Raw sample identifier
pub const SAMPLE_ID: &str = "Sample_ID";
/// Incubation time in days
pub const TIME: &str = "Time";
/// Disk / Dust / Unknown
pub const SAMPLE_TYPE: &str = "Sample_Type";
/// Treatment group letter
pub const GROUP: &str = "Group";
/// Two-digit sample number
pub const SAMPLE_NUMBER: &str = "Sample_Number";
/// Sample number + group
pub const SAMPLE_COMBO: &str = "Sample_Combo";
/// Shale specimen / batch identity
pub const SHALE_ID: &str = "Shale_ID";
/// Source batch label
pub const EXPERIMENT: &str = "Experiment";
/// Element symbol
pub const ELEMENT: &str = "Element";
/// Concentration value
pub const CONCENTRATION: &str = "Concentration";

/// O2 present (condition columns)
pub const O2: &str = "O2";
/// CO2 present (condition columns)
pub const CO2: &str = "CO2";
/// Combined condition label (condition columns)
pub const CONDITION: &str = "Condition";

/// Columns present in every export, in order
pub const RECORD_COLUMNS: [&str; 10] = [
    SAMPLE_ID,
    TIME,
    SAMPLE_TYPE,
    GROUP,
    SAMPLE_NUMBER,
    SAMPLE_COMBO,
    SHALE_ID,
    EXPERIMENT,
    ELEMENT,
    CONCENTRATION,
];

/// Columns appended when conditions were derived
pub const CONDITION_COLUMNS: [&str; 3] = [O2, CO2, CONDITION];

/// Export format version written to Parquet footers
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";

/// Footer key for the format version
pub const KEY_FORMAT_VERSION: &str = "icp:format_version";
/// Footer key for the export timestamp
pub const KEY_EXPORT_TIMESTAMP: &str = "icp:export_timestamp";
/// Footer key for the JSON source list
pub const KEY_SOURCES: &str = "icp:sources";
