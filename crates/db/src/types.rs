use sqlx::{
    Decode, Sqlite, Type,
    error::BoxDynError,
    sqlite::{SqliteTypeInfo, SqliteValueRef},
};

/// Column holding a bitcode encoded value.
///
/// Nested lists (recipe ingredients, shopping items, ...) are stored as a
/// single blob next to their parent row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bitcode<T>(pub T);

impl<T: bitcode::Encode> Bitcode<T> {
    pub fn encode(value: &T) -> Vec<u8> {
        bitcode::encode(value)
    }
}

impl<T> Type<Sqlite> for Bitcode<T> {
    fn type_info() -> SqliteTypeInfo {
        <Vec<u8> as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <Vec<u8> as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r, T> Decode<'r, Sqlite> for Bitcode<T>
where
    T: for<'a> bitcode::Decode<'a>,
{
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let bytes = <&[u8] as Decode<Sqlite>>::decode(value)?;

        Ok(Bitcode(bitcode::decode(bytes)?))
    }
}
