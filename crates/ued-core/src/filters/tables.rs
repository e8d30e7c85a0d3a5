//! Coefficient tables for the supported filter families.
//!
//! Orthogonal wavelets are stored as their synthesis low-pass filter
//! (`rec_lo`); the remaining three filters follow from the quadrature mirror
//! relations in [`FilterBank::from_rec_lo`](super::FilterBank::from_rec_lo).
//! Spline biorthogonal pairs other than `bior4.4` have dyadic rational taps
//! and are generated rather than tabulated.
//! Quarter-shift tables store the tree A analysis low-pass filter.

// Daubechies, `rec_lo`.

pub(crate) static DB1: [f64; 2] = [
    0.7071067811865475244,
    0.7071067811865475244,
];

pub(crate) static DB2: [f64; 4] = [
    0.48296291314453414337,
    0.83651630373780790558,
    0.22414386804201338103,
    -0.12940952255126038117,
];

pub(crate) static DB3: [f64; 6] = [
    0.332670552950082616,
    0.80689150931109257649,
    0.4598775021184915701,
    -0.1350110200102545887,
    -0.085441273882026661693,
    0.035226291885709536603,
];

pub(crate) static DB4: [f64; 8] = [
    0.23037781330889650086,
    0.71484657055291564709,
    0.63088076792985890788,
    -0.027983769416859854211,
    -0.18703481171909308408,
    0.030841381835560763627,
    0.032883011666885199735,
    -0.010597401785069032105,
];

pub(crate) static DB5: [f64; 10] = [
    0.16010239797419291448,
    0.60382926979718967054,
    0.72430852843777292773,
    0.13842814590132073151,
    -0.24229488706638203186,
    -0.032244869584638374648,
    0.077571493840045713523,
    -0.0062414902127982742742,
    -0.012580751999081999469,
    0.003335725285473771278,
];

pub(crate) static DB6: [f64; 12] = [
    0.11154074335010946362,
    0.49462389039845308568,
    0.75113390802109535068,
    0.31525035170919762909,
    -0.22626469396543982008,
    -0.12976686756726193556,
    0.097501605587323049102,
    0.027522865530305728626,
    -0.031582039317486029565,
    0.00055384220116149613925,
    0.0047772575109455106396,
    -0.0010773010853084795649,
];

pub(crate) static DB7: [f64; 14] = [
    0.07785205408500917902,
    0.39653931948191730654,
    0.72913209084623511992,
    0.46978228740519312247,
    -0.14390600392856497541,
    -0.22403618499387498264,
    0.071309219266830264751,
    0.080612609151083071913,
    -0.03802993693501441358,
    -0.016574541630666880654,
    0.012550998556099840613,
    0.00042957797292136652113,
    -0.0018016407040474909153,
    0.00035371379997452024845,
];

pub(crate) static DB8: [f64; 16] = [
    0.054415842243104009955,
    0.31287159091429997066,
    0.67563073629728980681,
    0.58535468365420671277,
    -0.015829105256349305667,
    -0.28401554296154692652,
    0.00047248457391328277036,
    0.12874742662047845886,
    -0.01736930100180754617,
    -0.044088253930794751507,
    0.013981027917398281649,
    0.0087460940474057767164,
    -0.0048703529934515743104,
    -0.0003917403733769470463,
    0.00067544940645056936637,
    -0.00011747678412476953373,
];

pub(crate) static DB9: [f64; 18] = [
    0.038077947363878346589,
    0.24383467461259035373,
    0.6048231236901111119,
    0.65728807805130053808,
    0.13319738582500757619,
    -0.29327378327917490881,
    -0.096840783222976460514,
    0.14854074933810638014,
    0.030725681479333379212,
    -0.067632829061329973676,
    0.00025094711483145195759,
    0.022361662123679097205,
    -0.0047232047577513972779,
    -0.0042815036824634298345,
    0.0018476468830562264766,
    0.00023038576352319596721,
    -0.00025196318894271013697,
    0.000039347320316271599481,
];

pub(crate) static DB10: [f64; 20] = [
    0.026670057900555553587,
    0.18817680007769148902,
    0.52720118893172558648,
    0.68845903945360356574,
    0.28117234366057746075,
    -0.24984642432731537942,
    -0.1959462743773770435,
    0.12736934033579326008,
    0.09305736460357235116,
    -0.071394147166397087145,
    -0.029457536821875812858,
    0.03321267405934100174,
    0.0036065535669561696554,
    -0.010733175483330575044,
    0.0013953517470529011658,
    0.0019924052951850561172,
    -0.00068585669495971162656,
    -0.00011646685512928545095,
    0.000093588670320069591334,
    -0.000013264202894521244812,
];

// Symlets, `rec_lo`.

pub(crate) static SYM2: [f64; 4] = [
    0.48296291314453414337,
    0.83651630373780790558,
    0.22414386804201338103,
    -0.12940952255126038117,
];

pub(crate) static SYM3: [f64; 6] = [
    0.332670552950082616,
    0.80689150931109257649,
    0.4598775021184915701,
    -0.1350110200102545887,
    -0.085441273882026661693,
    0.035226291885709536603,
];

pub(crate) static SYM4: [f64; 8] = [
    0.032223100604051467872,
    -0.012603967262031303754,
    -0.099219543576633532585,
    0.2978577956053060514,
    0.80373875180513208088,
    0.49761866763277498998,
    -0.029635527646002491764,
    -0.075765714789502213228,
];

pub(crate) static SYM5: [f64; 10] = [
    0.027333068344998768818,
    0.02951949092570626125,
    -0.039134249302313843624,
    0.1993975339768555969,
    0.72340769040404079207,
    0.63397896345679206372,
    0.016602105764510848133,
    -0.17532808990805622424,
    -0.021101834024689041001,
    0.019538882735249826776,
];

pub(crate) static SYM6: [f64; 12] = [
    0.015404109327044824299,
    0.0034907120842221625153,
    -0.1179901111485200254,
    -0.048311742585698054971,
    0.49105594192797373304,
    0.78764114102865099607,
    0.33792942172816583271,
    -0.072637522786376583464,
    -0.021060292512370847992,
    0.044724901770781384663,
    0.001767711864254007741,
    -0.0078007083250323804142,
];

pub(crate) static SYM7: [f64; 14] = [
    0.012015419283549189053,
    0.017213376300804502861,
    -0.06490800354718848576,
    -0.064131289807385821039,
    0.36021846090626020101,
    0.78192159329172812499,
    0.48361091568226769662,
    -0.056804476889666969319,
    -0.10101092086842029949,
    0.044742349468352376652,
    0.020464207577546033667,
    -0.018126605131338460955,
    -0.0032832978474668107035,
    0.0022918339540537712112,
];

pub(crate) static SYM8: [f64; 16] = [
    0.0018899503327676891843,
    -0.00030292051472413308126,
    -0.014952258337062199118,
    0.0038087520138944894631,
    0.049137179673730286787,
    -0.027219029917103486322,
    -0.051945838107881800736,
    0.36444189483617893676,
    0.77718575169962802862,
    0.48135965125905339159,
    -0.061273359067811077843,
    -0.14329423835127266284,
    0.0076074873249766081919,
    0.031695087811525991431,
    -0.00054213233180001068935,
    -0.0033824159510050025955,
];

pub(crate) static SYM9: [f64; 18] = [
    0.0010694900329086119159,
    -0.00047315449868004354219,
    -0.010264064027633120485,
    0.0088592674934002666972,
    0.06207778930288574757,
    -0.01823377077939550557,
    -0.19155083129728433495,
    0.035272488035271042689,
    0.61733844914093415132,
    0.71789708276441240466,
    0.23876091460730516626,
    -0.054568958430833351097,
    0.00058346274612498183102,
    0.030224878858275188135,
    -0.011528210207679186143,
    -0.013271967781817133806,
    0.00061978088898550708094,
    0.0014009155259146562313,
];

pub(crate) static SYM10: [f64; 20] = [
    0.00086257822622597242902,
    0.00071542054205433971798,
    -0.0070567640625873042175,
    0.00059568278374251904276,
    0.049686126646942881579,
    0.026240365058448987227,
    -0.12155210554854894421,
    -0.01501923883913785974,
    0.51370987334802634488,
    0.766954836560609561,
    0.34021601302346215243,
    -0.087878711511975135017,
    -0.067089907808381801748,
    0.033842354663575221373,
    -0.00086875210968925813854,
    -0.023005461353497509884,
    -0.0011404297952173284664,
    0.0050716491985317990153,
    0.00034014926631480986305,
    -0.00041011591580439833378,
];

// Coiflets, `rec_lo`.

pub(crate) static COIF1: [f64; 6] = [
    -0.0727326195128539,
    0.3378976624578092,
    0.8525720202122554,
    0.38486484686420286,
    -0.0727326195128539,
    -0.01565572813546454,
];

pub(crate) static COIF2: [f64; 12] = [
    0.016387336463522112,
    -0.04146493678175915,
    -0.06737255472196302,
    0.3861100668211622,
    0.8127236354455423,
    0.41700518442169254,
    -0.0764885990783064,
    -0.0594344186464569,
    0.023680171946334084,
    0.0056114348193944995,
    -0.0018232088707029932,
    -0.0007205494453645122,
];

pub(crate) static COIF3: [f64; 18] = [
    -0.003793512864491014,
    0.007782596427325418,
    0.023452696141836267,
    -0.0657719112818555,
    -0.06112339000267287,
    0.4051769024096169,
    0.7937772226256206,
    0.42848347637761874,
    -0.07179982161931202,
    -0.08230192710688598,
    0.03455502757306163,
    0.015880544863615904,
    -0.00900797613666158,
    -0.0025745176887502236,
    0.0011175187708906016,
    0.0004662169601128863,
    -7.098330313814125e-05,
    -3.459977283621256e-05,
];

pub(crate) static COIF4: [f64; 24] = [
    0.0008923136685823146,
    -0.0016294920126017326,
    -0.0073461663276420935,
    0.016068943964776348,
    0.026682300156053072,
    -0.08126669968087875,
    -0.05607731331675481,
    0.41530840703043026,
    0.782238930920499,
    0.4343860564914685,
    -0.06662747426342504,
    -0.09622044203398798,
    0.03933442712333749,
    0.025082261844864097,
    -0.015211731527946259,
    -0.00565828668661072,
    0.003751436157278457,
    0.0012665619292989445,
    -0.0005890207562443383,
    -0.00025997455248771324,
    6.233903446100713e-05,
    3.1229875865345646e-05,
    -3.2596802368833675e-06,
    -1.7849850030882614e-06,
];

pub(crate) static COIF5: [f64; 30] = [
    -0.00021208083980379827,
    0.00035858968789573785,
    0.0021782363581090178,
    -0.004159358781386048,
    -0.010131117519849788,
    0.023408156785839195,
    0.02816802897093635,
    -0.09192001055969624,
    -0.05204316317624377,
    0.4215662066908515,
    0.7742896036529562,
    0.4379916261718371,
    -0.06203596396290357,
    -0.10557420870333893,
    0.0412892087501817,
    0.03268357426711183,
    -0.01976177894257264,
    -0.009164231162481846,
    0.006764185448053083,
    0.0024333732126576722,
    -0.0016628637020130838,
    -0.0006381313430451114,
    0.00030225958181306315,
    0.00014054114970203437,
    -4.134043227251251e-05,
    -2.1315026809955787e-05,
    3.7346551751414047e-06,
    2.0637618513646814e-06,
    -1.6744288576823017e-07,
    -9.517657273819165e-08,
];

// Cohen-Daubechies-Feauveau 9/7 pair (`bior4.4`), analysis and synthesis
// low-pass filters.

pub(crate) static BIOR4_4_DEC_LO: [f64; 10] = [
    0.0,
    0.03782845550726404,
    -0.023849465019556843,
    -0.11062440441843718,
    0.37740285561283066,
    0.8526986790088938,
    0.37740285561283066,
    -0.11062440441843718,
    -0.023849465019556843,
    0.03782845550726404,
];

pub(crate) static BIOR4_4_REC_LO: [f64; 10] = [
    0.0,
    -0.06453888262869706,
    -0.04068941760916406,
    0.41809227322161724,
    0.7884856164055829,
    0.41809227322161724,
    -0.04068941760916406,
    -0.06453888262869706,
    0.0,
    0.0,
];

// Kingsbury's quarter-shift sets a, b, c and d, tree A `dec_lo`.

pub(crate) static QSHIFT_A: [f64; 10] = [
    0.0035501975354548464759,
    -0.014945623475961245779,
    -0.10090982325122346966,
    0.23629155185709623359,
    0.78650975822373559964,
    0.55562609129828157383,
    -0.0067844593816614709674,
    -0.075742264700652850435,
    0.024741108060242018912,
    0.0058770262077838131954,
];

pub(crate) static QSHIFT_B: [f64; 14] = [
    0.0012625766729627116017,
    -0.0015076366434379870214,
    0.027122976427952104449,
    -0.029600088718527324421,
    -0.11132814246856436972,
    0.26171170039307596585,
    0.76768808551509619902,
    0.56409571316313727335,
    0.005496095476736447836,
    -0.096731891742537330538,
    0.020084769148928429283,
    0.011835235254108574039,
    -0.0032195795865639980678,
    -0.0026962505192716468634,
];

pub(crate) static QSHIFT_C: [f64; 16] = [
    -0.000032078068774711246396,
    -0.0024619089119083127083,
    -0.0020218143519634150585,
    0.026970885207679171883,
    -0.027535061987462368341,
    -0.11098823353842423507,
    0.26015783711481211907,
    0.76883534342226191363,
    0.56381408843507889826,
    0.0041036339239893127602,
    -0.095014293440730164857,
    0.019519119211105707425,
    0.009012780992184057769,
    0.0011113331368398359368,
    -0.001274677506596891194,
    0.000016608735004130540363,
];

pub(crate) static QSHIFT_D: [f64; 18] = [
    0.0005157568590578041289,
    0.00047361635303828326839,
    -0.0053510339708189098543,
    0.0024459894942169404429,
    0.037980859426453137068,
    -0.044203536652108898637,
    -0.11168681221227081138,
    0.2723773337675352235,
    0.75992361674616045604,
    0.56463788738265901136,
    0.017134708549776397955,
    -0.11112971048339739632,
    0.01731339623587326007,
    0.02428686090451112736,
    -0.0080570398713027257327,
    -0.0025076478619726320712,
    -0.00066667057638108389922,
    0.00072598828206586550561,
];

// Kingsbury (1999) filters, published to eight and fourteen digits.
// Both trees are stored explicitly as analysis filters; synthesis filters
// are their time reverses.

pub(crate) static K99_A_DEC_LO: [f64; 10] = [
    0.03516384,
    0.0,
    -0.08832942,
    0.23389032,
    0.76027237,
    0.5875183,
    0.0,
    -0.11430184,
    0.0,
    0.0,
];

pub(crate) static K99_A_DEC_HI: [f64; 10] = [
    0.0,
    0.0,
    -0.11430184,
    0.0,
    0.5875183,
    -0.76027237,
    0.23389032,
    0.08832942,
    0.0,
    -0.03516384,
];

pub(crate) static K99_B_DEC_LO: [f64; 10] = [
    0.0,
    0.0,
    -0.11430184,
    0.0,
    0.5875183,
    0.76027237,
    0.23389032,
    -0.08832942,
    0.0,
    0.03516384,
];

pub(crate) static K99_B_DEC_HI: [f64; 10] = [
    -0.03516384,
    0.0,
    0.08832942,
    0.23389032,
    -0.76027237,
    0.5875183,
    0.0,
    -0.11430184,
    0.0,
    0.0,
];

pub(crate) static K99_FS_A_DEC_LO: [f64; 10] = [
    0.0,
    -0.08838834764832,
    0.08838834764832,
    0.695879989034,
    0.695879989034,
    0.08838834764832,
    -0.08838834764832,
    0.01122679215254,
    0.01122679215254,
    0.0,
];

pub(crate) static K99_FS_A_DEC_HI: [f64; 10] = [
    0.0,
    -0.01122679215254,
    0.01122679215254,
    0.08838834764832,
    0.08838834764832,
    -0.695879989034,
    0.695879989034,
    -0.08838834764832,
    -0.08838834764832,
    0.0,
];

pub(crate) static K99_FS_B_DEC_LO: [f64; 10] = [
    0.01122679215254,
    0.01122679215254,
    -0.08838834764832,
    0.08838834764832,
    0.695879989034,
    0.695879989034,
    0.08838834764832,
    -0.08838834764832,
    0.0,
    0.0,
];

pub(crate) static K99_FS_B_DEC_HI: [f64; 10] = [
    0.0,
    0.0,
    -0.08838834764832,
    -0.08838834764832,
    0.695879989034,
    -0.695879989034,
    0.08838834764832,
    0.08838834764832,
    0.01122679215254,
    -0.01122679215254,
];
