mod dashboard_tests;
mod dataset_tests;
mod predict_tests;
