use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize;
use diesel::serialize::{Output, ToSql, IsNull};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};

/// The content of one side of a card
///
/// Early decks stored each side as a bare string; newer decks store a
/// structured object with optional media attachments. Both shapes are kept
/// readable and writable: `Plain` round-trips as a JSON string, `Rich` as an
/// object, so existing exports keep deserializing unchanged.
///
/// Stored in the database as a JSON TEXT column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(untagged)]
pub enum CardContent {
    /// Legacy plain-text side; may contain `$...$` / `$$...$$` formula
    /// markers and the lightweight emphasis markup
    Plain(String),

    /// Structured side with media attachments
    Rich(RichContent),
}

/// Structured card side content
///
/// All fields are optional on the wire and default to empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichContent {
    /// Free text, may contain formula markers
    #[serde(default)]
    pub text: String,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Video URLs (YouTube/Vimeo links or direct embed URLs)
    #[serde(default)]
    pub videos: Vec<String>,

    /// Tables as row-major cell grids; every row of a table has the same
    /// number of columns
    #[serde(default)]
    pub tables: Vec<Vec<Vec<String>>>,

    /// Standalone formulas, one expression per entry
    #[serde(default)]
    pub formulas: Vec<String>,
}

impl CardContent {
    /// Normalizes either representation into a full `RichContent`
    ///
    /// A plain string becomes `{ text, .. }` with every attachment list
    /// empty. Normalization is pure and idempotent:
    /// `Rich(x.normalize()).normalize() == x.normalize()`.
    pub fn normalize(&self) -> RichContent {
        match self {
            CardContent::Plain(text) => RichContent {
                text: text.clone(),
                ..RichContent::default()
            },
            CardContent::Rich(rich) => rich.clone(),
        }
    }

    /// Returns true if the content has anything to show
    ///
    /// Whitespace-only text does not count, but any attachment (image,
    /// video, table or formula) makes the side non-empty even with blank
    /// text.
    pub fn is_non_empty(&self) -> bool {
        match self {
            CardContent::Plain(text) => !text.trim().is_empty(),
            CardContent::Rich(rich) => {
                !rich.text.trim().is_empty()
                    || !rich.images.is_empty()
                    || !rich.videos.is_empty()
                    || !rich.tables.is_empty()
                    || !rich.formulas.is_empty()
            }
        }
    }
}

impl RichContent {
    /// Checks that a table grid is rectangular
    ///
    /// Row lengths are fixed when a table is created; cell edits only change
    /// values. An empty table is trivially rectangular.
    pub fn table_is_rectangular(table: &[Vec<String>]) -> bool {
        match table.first() {
            Some(first) => table.iter().all(|row| row.len() == first.len()),
            None => true,
        }
    }

    /// Checks every table in this content for a rectangular shape
    pub fn tables_are_rectangular(&self) -> bool {
        self.tables.iter().all(|t| Self::table_is_rectangular(t))
    }
}

impl FromSql<Text, Sqlite> for CardContent {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        let content = serde_json::from_str(&text)?;
        Ok(content)
    }
}

impl ToSql<Text, Sqlite> for CardContent {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(serde_json::to_string(self)?);
        Ok(IsNull::No)
    }
}

/// Self-assessed difficulty of a card
///
/// Serialized in lowercase both in JSON and in the database, matching the
/// values decks have always used on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The lowercase wire/storage form
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Applies the grading rule after a study answer
    ///
    /// Remembered cards become easy. Forgotten cards get harder: easy drops
    /// to medium, medium and hard both land on hard.
    pub fn graded(self, remembered: bool) -> Difficulty {
        if remembered {
            Difficulty::Easy
        } else {
            match self {
                Difficulty::Easy => Difficulty::Medium,
                Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
            }
        }
    }
}

impl FromSql<Text, Sqlite> for Difficulty {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        match text.as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unrecognized difficulty: {}", other).into()),
        }
    }
}

impl ToSql<Text, Sqlite> for Difficulty {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str().to_string());
        Ok(IsNull::No)
    }
}
