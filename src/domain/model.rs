use crate::utils::text::slugify;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 欄位種類，決定套用哪一條驗證規則。順序即為檔案中的欄位順序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    SeatNumber,
    PassengerName,
    Class,
    Destination,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::SeatNumber,
        FieldKind::PassengerName,
        FieldKind::Class,
        FieldKind::Destination,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::SeatNumber => "SEAT_NUMBER",
            FieldKind::PassengerName => "PASSENGER_NAME",
            FieldKind::Class => "CLASS",
            FieldKind::Destination => "DESTINATION",
        }
    }

    pub fn position(&self) -> usize {
        match self {
            FieldKind::SeatNumber => 0,
            FieldKind::PassengerName => 1,
            FieldKind::Class => 2,
            FieldKind::Destination => 3,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationClass {
    Economy,
    Business,
    First,
}

impl ReservationClass {
    pub const ALL: [ReservationClass; 3] = [
        ReservationClass::Economy,
        ReservationClass::Business,
        ReservationClass::First,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReservationClass::Economy => "ECONOMY",
            ReservationClass::Business => "BUSINESS",
            ReservationClass::First => "FIRST",
        }
    }
}

impl fmt::Display for ReservationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReservationClass {
    type Err = String;

    /// 不分大小寫；檔案內容的嚴格比對由欄位驗證負責
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        ReservationClass::ALL
            .into_iter()
            .find(|class| class.name() == normalized)
            .ok_or_else(|| format!("unknown class '{}'", s))
    }
}

macro_rules! destinations {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// 系統支援的目的地
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Destination {
            $(#[serde(rename = $name)] $variant),+
        }

        impl Destination {
            pub const ALL: &'static [Destination] = &[$(Destination::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Destination::$variant => $name),+
                }
            }
        }
    };
}

destinations! {
    Paris => "PARIS",
    Londres => "LONDRES",
    NuevaYork => "NUEVA_YORK",
    Tokio => "TOKIO",
    Roma => "ROMA",
    Madrid => "MADRID",
    Barcelona => "BARCELONA",
    Berlin => "BERLIN",
    Amsterdam => "AMSTERDAM",
    Dubai => "DUBAI",
    Singapur => "SINGAPUR",
    Sidney => "SIDNEY",
    BuenosAires => "BUENOS_AIRES",
    CiudadDeMexico => "CIUDAD_DE_MEXICO",
    LosAngeles => "LOS_ANGELES",
    SanFrancisco => "SAN_FRANCISCO",
    Chicago => "CHICAGO",
    Toronto => "TORONTO",
    Moscu => "MOSCU",
    Pekin => "PEKIN",
    Seul => "SEUL",
    Bangkok => "BANGKOK",
    Estambul => "ESTAMBUL",
    ElCairo => "EL_CAIRO",
    Atenas => "ATENAS",
    Lisboa => "LISBOA",
    Praga => "PRAGA",
    Viena => "VIENA",
    Venecia => "VENECIA",
    RioDeJaneiro => "RIO_DE_JANEIRO",
    Lima => "LIMA",
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Destination {
    type Err = String;

    /// 接受 `NUEVA_YORK`、`nueva york` 等寫法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().split_whitespace().collect::<Vec<_>>().join("_");
        Destination::ALL
            .iter()
            .copied()
            .find(|dest| dest.name() == normalized)
            .ok_or_else(|| format!("unknown destination '{}'", s))
    }
}

static FIELD_ORDER: [FieldKind; 4] = FieldKind::ALL;

/// 檔案欄位配置：三欄（無目的地）或四欄（含目的地）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub has_destination: bool,
}

impl Schema {
    pub const WITH_DESTINATION: Schema = Schema {
        has_destination: true,
    };
    pub const WITHOUT_DESTINATION: Schema = Schema {
        has_destination: false,
    };

    pub fn width(&self) -> usize {
        if self.has_destination {
            4
        } else {
            3
        }
    }

    pub fn kinds(&self) -> &'static [FieldKind] {
        &FIELD_ORDER[..self.width()]
    }

    pub fn header_line(&self) -> String {
        self.kinds()
            .iter()
            .map(FieldKind::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 檔案中的一行原始資料，欄位未經修剪
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, kind: FieldKind) -> Option<&str> {
        self.fields.get(kind.position()).map(|f| f.trim())
    }

    /// 與欄位名稱相同的列視為標題列
    /// 完整的三欄或四欄標題列；只有部分欄名的列不算
    pub fn is_header(&self) -> bool {
        (Schema::WITHOUT_DESTINATION.width()..=Schema::WITH_DESTINATION.width())
            .contains(&self.fields.len())
            && self
                .fields
                .iter()
                .zip(FieldKind::ALL.iter())
                .all(|(field, kind)| field.trim().eq_ignore_ascii_case(kind.name()))
    }

    /// 原樣以逗號串接，寫入錯誤紀錄用
    pub fn raw_joined(&self) -> String {
        self.fields.join(",")
    }

    /// 修剪後以 ", " 串接，寫入目的地檔案用
    pub fn output_line(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.trim())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 由資料來源取得的一筆訂位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub seat_number: String,
    pub passenger_name: String,
    pub class: ReservationClass,
    pub destination: Option<String>,
}

impl ReservationRecord {
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.seat_number.clone(),
            self.passenger_name.clone(),
            self.class.name().to_string(),
        ];
        if let Some(destination) = &self.destination {
            fields.push(destination.clone());
        }
        fields
    }

    pub fn to_line(&self) -> String {
        self.fields().join(", ")
    }
}

/// 單列處理結果；皆為終態，不重試
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Accepted,
    RejectedWidth { expected: usize, found: usize },
    RejectedField { kind: FieldKind, reason: String },
}

impl RowStatus {
    pub fn reason(&self) -> Option<String> {
        match self {
            RowStatus::Accepted => None,
            RowStatus::RejectedWidth { expected, found } => Some(format!(
                "wrong number of fields (expected {}, found {})",
                expected, found
            )),
            RowStatus::RejectedField { reason, .. } => Some(reason.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub timestamp: String,
    pub row: RawRow,
    pub status: RowStatus,
}

impl Rejection {
    pub fn log_line(&self) -> String {
        format!(
            "{}, {}, {}",
            self.timestamp,
            self.row.raw_joined(),
            self.status.reason().unwrap_or_default()
        )
    }
}

/// 依分組鍵聚合的合法資料列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationGroup {
    pub key: String,
    pub label: String,
    pub rows: Vec<RawRow>,
}

impl DestinationGroup {
    pub fn new(label: &str) -> Self {
        Self {
            key: slugify(label),
            label: label.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}{}.txt", prefix, self.key)
    }
}

/// 轉換階段的輸出
#[derive(Debug, Clone, Default)]
pub struct PartitionPlan {
    pub groups: Vec<DestinationGroup>,
    pub rejections: Vec<Rejection>,
}

impl PartitionPlan {
    pub fn valid_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }

    /// 依插入順序加入分組，鍵相同（正規化後）者併入同一組
    pub fn push(&mut self, label: &str, row: RawRow) {
        let key = slugify(label);
        match self.groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.rows.push(row),
            None => {
                let mut group = DestinationGroup::new(label);
                group.rows.push(row);
                self.groups.push(group);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCount {
    pub file_name: String,
    pub destination: String,
    pub count: usize,
}

/// 一次處理結束後的統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    pub files: Vec<FileCount>,
    pub total_valid: usize,
    pub rejected: usize,
    pub error_log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_width_and_header() {
        assert_eq!(Schema::WITH_DESTINATION.width(), 4);
        assert_eq!(Schema::WITHOUT_DESTINATION.width(), 3);
        assert_eq!(
            Schema::WITH_DESTINATION.header_line(),
            "SEAT_NUMBER, PASSENGER_NAME, CLASS, DESTINATION"
        );
        assert_eq!(
            Schema::WITHOUT_DESTINATION.header_line(),
            "SEAT_NUMBER, PASSENGER_NAME, CLASS"
        );
    }

    #[test]
    fn test_header_detection() {
        let header = RawRow::new(
            1,
            vec![
                "SEAT_NUMBER".into(),
                " PASSENGER_NAME".into(),
                " CLASS".into(),
                " DESTINATION".into(),
            ],
        );
        assert!(header.is_header());

        let data = RawRow::new(2, vec!["12A".into(), "John".into(), "ECONOMY".into()]);
        assert!(!data.is_header());

        let partial = RawRow::new(3, vec!["SEAT_NUMBER".into(), "PASSENGER_NAME".into()]);
        assert!(!partial.is_header());
        assert!(!RawRow::new(4, vec!["seat_number".into()]).is_header());
    }

    #[test]
    fn test_plan_groups_in_insertion_order() {
        let mut plan = PartitionPlan::default();
        plan.push("TOKIO", RawRow::new(1, vec!["1A".into()]));
        plan.push("PARIS", RawRow::new(2, vec!["2A".into()]));
        plan.push("Tokio", RawRow::new(3, vec!["3A".into()]));

        assert_eq!(plan.groups.len(), 2);
        assert_eq!(plan.groups[0].label, "TOKIO");
        assert_eq!(plan.groups[0].rows.len(), 2);
        assert_eq!(plan.groups[1].file_name("reservas_"), "reservas_paris.txt");
        assert_eq!(plan.valid_count(), 3);
    }

    #[test]
    fn test_parse_catalogue_values() {
        assert_eq!("nueva york".parse::<Destination>(), Ok(Destination::NuevaYork));
        assert_eq!("business".parse::<ReservationClass>(), Ok(ReservationClass::Business));
        assert_eq!("destination".parse::<FieldKind>(), Ok(FieldKind::Destination));
        assert_eq!(Destination::ALL.len(), 31);
        assert!("ATLANTIS".parse::<Destination>().is_err());
    }
}
