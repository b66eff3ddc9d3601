pub mod detection_history;
