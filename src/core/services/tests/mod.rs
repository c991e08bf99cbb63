mod fee_service_tests;
