mod static_token_verifier_test;
