pub mod data_url_decoder;
