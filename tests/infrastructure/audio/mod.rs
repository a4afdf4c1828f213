mod openai_whisper_transcriber_test;
