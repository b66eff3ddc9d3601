pub mod snapshot_decoder;
