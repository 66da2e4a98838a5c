pub mod table_query;
