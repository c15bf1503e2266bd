mod sse_tests;
