/// Copy the listed columns of a structure-of-arrays store into a `PyDict`
/// of 1D numpy arrays keyed by column name.
macro_rules! store_to_dict {
    ($py:expr, $store:expr, $($field:ident),+ $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        $(
            dict.set_item(stringify!($field), numpy::PyArray1::from_slice($py, &$store.$field))?;
        )+
        dict
    }};
}

/// Copy the listed grid fields of a struct into a `PyDict` of 2D numpy arrays.
macro_rules! grids_to_dict {
    ($py:expr, $src:expr, $($field:ident),+ $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        $(
            dict.set_item(stringify!($field), numpy::ToPyArray::to_pyarray(&$src.$field, $py))?;
        )+
        dict
    }};
}
