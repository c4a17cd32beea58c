use crate::define_index_newtype;

// Row/column of the distance matrix.
define_index_newtype!(LocationIdx);
