use serde::{Deserialize, Serialize, Serializer};
use sqlx::{
    error::BoxDynError,
    sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef},
    Decode, Type, TypeInfo, ValueRef,
};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub rating: Numeric,
    pub is_veg: i64,
    pub has_outdoor_seating: i64,
    pub is_luxury: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: Numeric,
    pub is_veg: i64,
}

/// A numeric column value as sqlite handed it back.
///
/// Whole numbers serialize without a fraction whatever their storage class,
/// so a `rating REAL` of `4` is written as `4`, not `4.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Real(f64),
}

impl Numeric {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Real(n) => n,
        }
    }
}

// largest magnitude below which every whole f64 is exactly an i64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Integer(n) => serializer.serialize_i64(n),
            Self::Real(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
                serializer.serialize_i64(n as i64)
            }
            Self::Real(n) => serializer.serialize_f64(n),
        }
    }
}

impl Type<Sqlite> for Numeric {
    fn type_info() -> SqliteTypeInfo {
        <f64 as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <f64 as Type<Sqlite>>::compatible(ty) || <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for Numeric {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let is_integer = value.type_info().name() == "INTEGER";
        if is_integer {
            Ok(Self::Integer(<i64 as Decode<'r, Sqlite>>::decode(value)?))
        } else {
            Ok(Self::Real(<f64 as Decode<'r, Sqlite>>::decode(value)?))
        }
    }
}

/// Truthy/falsy request parameter, bound into queries as `1` or `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Flag(bool);

impl Flag {
    pub fn new(value: bool) -> Self {
        Self(value)
    }

    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }
}

impl std::str::FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(Self(true)),
            "0" | "false" => Ok(Self(false)),
            other => Err(format!("invalid flag value `{other}`, expect 0, 1, true or false")),
        }
    }
}

impl TryFrom<String> for Flag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
