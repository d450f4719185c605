pub mod xcom_csv;
