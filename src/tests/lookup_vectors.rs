// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Known-answer vectors for the OPRF, keyed by ciphersuite identifier. The
//! key is `SHA-256("leakcheck test key")` and the second blind is
//! `SHA-256("blind")`, both read as big-endian integers.

pub(crate) const VECTORS: &str = r#"
{
    "MODP-1536": {
        "skSm": "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000007c0344ef19f273648bf8e0e8863af962389ad4993d2329326a299358c30d767b",
        "vectors": [
            {
                "Input": "70617373776f7264",
                "Blind": "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000002",
                "BlindedElement": "a4bd40a1fd17b304ecd5ce8d8e9aea96cede9ed92f56bbbbb749ca7c172bc11d14118ecb1aa039c2bd65a73bd21cabede3106c689d5900778d7da05eada86061e1510941c37c6a7b2c284b536a5372d936077cc54c11fc3d2b844f4e1e80bf2e5282cac9937df544c89ebb628d714ae0d4362e90d20d897b70f80be91d2c97bc681465205d8565e3f8716e9f5eb766fb8b698cd9cbffda90131ae0db3fcbd2b8745669cdee7707e093ec0d175b5e45f5c298bdb8d972b1e7fc6011f58427c8ef",
                "EvaluationElement": "9fc70656459bdd05f5df94138791f53752e1c66e75a0680b58ab27479aee5beb833e562139c9abf843b1246559efbb84d65936f201896b1bd2ece8f5370bd5f253653a272a96c7c66cb9a82dd385dcff8c985f9790caf7391337f8aa7cce4e3839f81b63d4ceef86c97d26f75c29da3a455067a8b3914f8eaa7dfdf3b8d03f59b395253be98fbd6fdf0727b13d19dc7718509495f76ce3f02a20b8f750c91f92320a92e524b7fab2818ed98509bd93f823ede3cc84f457640c54bb84123ce222",
                "Output": "aa1325e50ec9bd7f494dab003d37d417a8a213e456031a3b5f125fbc00feac4d",
                "Bucket": 1512
            },
            {
                "Input": "68756e74657232",
                "Blind": "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000e5b84c89f624a40cdfdc0c6da3c9f0b47ce587edae0117b8c8b7c0a9523db5c4",
                "BlindedElement": "67a0951b1d2df27e9b03cb3c00c5041811135e4004c4e9bc406cc1f7ed0a0ef2198830ed30c6a0ffaaacc12ef7b8904ce9a05c893b539fb2e573f4310ba00022d84a9964616855df83345963dfef6ce014f86384d2f26dfb96d2ae2803bc58838b21d8314cdcdf1ac7774c53ae0f21a7049c09e331f38f4fb4952a69e25f71b0b0e397868bbc9595c3122cd60f3da363e90e8bbdb0a2cb5e12112a069174a3b36aed0dc287e10e2ec4417648cf95003168cb636066be4cd4057416840882d3b8",
                "EvaluationElement": "5474e797afceefce67ef4905941119d6590cc73d1f609f4f4e5088f315338bcc7aa310a18db38568939158a2239a7b88ade6dc425872b4d5647d1d07f438fb3eaba7bbe852f9e945f0fd05423a6b746c930129e668c634e06e9890f6be461e7069d852814961a4c4e5351bd52d62b7316a6fcd44ed698abd37570f37a0abd71c68b94417b4e27fcff340488f64e867e51066905d090bef504f4a238d0e8e74583adf026692e3225b31069d5feb6098b7933beb52e170b5c5d69de7d09f5c18c1",
                "Output": "69a8bc302467eb1c64d66b8c317dfb87aa5e7c41005f9de136947dd218719a12",
                "Bucket": 3922
            }
        ]
    },
    "MODP-2048": {
        "skSm": "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000007c0344ef19f273648bf8e0e8863af962389ad4993d2329326a299358c30d767b",
        "vectors": [
            {
                "Input": "70617373776f7264",
                "Blind": "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000002",
                "BlindedElement": "59f90fda1376599c6df2d618fef7509b9c09b73ff046fb6aa4163ed0bfd42f6f7e780177b19dc9bf5df4967ec47157096c3a239e9f16f25e0d3e6a6f24921544c5ee542210e629c92fe4c5e6ba504bf63e81574c2885f04140f215b4987c6fb0d652ec0123e9433e2a6500767da32a159be3862b14c65f87e20872645ae77058e0a04d945e102b268d5099e730771a11780c12a7fbb0b5ccba05ef94af9118f6518520737ee8d33ff9a82430c48e6a8204890ab9427156a536a319d606c7e407783151c7d194da6fd0533f9c78699cfe61f94bb4711722d7b93dc22e1da9bd0cb2748c3fd41ee66ca5c27010491867d2e6760ffd91af3d820eeff9ad115a8f79",
                "EvaluationElement": "46bc55900afeb80fc37f4a2c5b9a9420f5b0ed1bfc190e510ec8610121d98876ea01b1dc8267ae378069cc1d4b3d73b802dc75e5894b59eff37979d50c382df846b0c92d496666117fdbca51668c6cc15246b0d0318a90cb53ca075fe4f21739d98aca53d087428082365e3d42fb042840ca5cbf5418e945015ff5b20a505701e0580c0782522c168c7f816e88e2ff41e2066180a2811f6c5994b48580339b381427dc0271178baefdeea50a7dc88ea344f326a42607a66d7f8aea0a4f2f7907ba93c12f085615d92526997f1d1539f9e45da902cd7cca3b887c162bc1d24547545b584bef299975eac89178a47df74aa4d3ac7592920d978dadf57ac13eec01",
                "Output": "abfc5e606d39a2a292518d831cc7642ae42bd43615825687d7c69618ff9c05be",
                "Bucket": 1512
            },
            {
                "Input": "68756e74657232",
                "Blind": "0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000e5b84c89f624a40cdfdc0c6da3c9f0b47ce587edae0117b8c8b7c0a9523db5c4",
                "BlindedElement": "c000ab4e7a80c8c2023f6819f33bc8f17be506660a4776b33fdaa28b17be156bbbdfa1078fe1877cb37035973dd2697ed485d5d2395c3f43f80bb7d001c6aad22928b940f23a30c8bd1ed3f3619f554abbff9993a4375f809adcc22ef5da8a265c0121ed0cda26a23a10fcba273699937f7b7f1e282d5045862e5d3faf67c3e2b0e7f18a7af27ea5d5622a92190093d20efe901adbc794f49a0179126b952ea9488a2b54eb7afe77f9fdb98dace277b6d3c55ea4552d1b08ecdb8df513911cc14e210c666e74ee471b6e4b5e8cc1bc1023f53718c354f45127aba61b4ab513de86f4f997428e1f1db0d9a1a41b9b91194c84b6351dff20ff08ad1be89ff2f3da",
                "EvaluationElement": "4c95aa67dc4fbbe713fb3db5f79856f7dd40166328afb9ed0f80dab1c000a2e39428608f85ac550a3cd829f8b23d3d898ce66442a0ccb9db15ffd475867952ff6025111ac6549eadf373a490f003ee4a6b8e56993bc72dcc5bea60587b6a2b6e80956dbcb16c3c33faa2e42e5ecb9f0f0d3ab199fb5ce573dff71ecec8323b1109320ce229fba4f53225a301d8667de68a2efd07126a4caa70acb47ea87aec605731f13757cda2d33c16caba87db805c1908536fe01897ea0cce281b44c93f64923906a5dea4a795004760681709b280be7874956c4783d635f70fd3f4d5c2be34d7d0020cf07493005a32a639a896d93eed74156390b81f94852fe3e2b50918",
                "Output": "42d00916a00f0b4436d122c177d77f12e454f3d0c061ed70dfb997f50e0a3d54",
                "Bucket": 3922
            }
        ]
    }
}

"#;
